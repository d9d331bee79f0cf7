use chrono::Local;

// Common text blocks for all prompts
pub const DONT_TELL_ME: &str = r#"
Important instructions for your responses:

1. Do not narrate or describe your actions.
2. Do not summarize or restate the instructions I've given you.
3. Do not preface your responses with phrases like "Here's an analysis..." or "I will now..."
4. Do not acknowledge or confirm that you understand these instructions.
5. Avoid phrases like "As an AI language model..." or similar self-referential statements.

Your responses should read as if written by an experienced financial news analyst.
"#;

pub const MARKDOWN_ONLY: &str =
    "DO NOT include any JSON or XML formatting in the response, just plain text with Markdown.";

/// Utility function to get the current date in a human-readable format
pub fn current_date() -> String {
    let today = Local::now();
    format!(
        "{} {}, {}",
        today.format("%B"),
        today.format("%-d"),
        today.format("%Y")
    )
}
