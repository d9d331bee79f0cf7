use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;
use std::sync::Arc;
use tracing::info;

use newslens::analyzer::{AnalyzeOptions, NewsAnalyzer, PipelineError};
use newslens::app::api;
use newslens::environment::Config;
use newslens::logging;
use newslens::report::{build_table, CompanyReport};

#[derive(Parser)]
#[clap(name = "newslens", about = "Company news sentiment and summary analysis")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze recent news about a company
    Analyze {
        /// Company name to search for
        #[clap(required = true)]
        company: String,

        /// Number of key sentences per article
        #[clap(short, long)]
        sentences: Option<usize>,

        /// Summarize the full article text instead of the feed snippet
        #[clap(long)]
        full_text: bool,

        /// Translate the final sentiment analysis
        #[clap(short, long)]
        translate: bool,

        /// Render the translated analysis as MP3 speech
        #[clap(long)]
        speech: bool,

        /// Skip the remote comparative and final analyses
        #[clap(long)]
        skip_analysis: bool,

        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on (defaults to PORT)
        #[clap(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args = Cli::parse();
    let config = Config::from_env()?;
    let analyzer = NewsAnalyzer::new(config)?;

    match args.command {
        Commands::Analyze {
            company,
            sentences,
            full_text,
            translate,
            speech,
            skip_analysis,
            json,
        } => {
            let mut options = analyzer.default_options();
            if let Some(sentences) = sentences {
                options.summary_sentences = sentences;
            }
            options.full_text = full_text;
            options.translate = translate;
            options.speech = speech;
            options.skip_analysis = skip_analysis;

            analyze(&analyzer, &company, &options, json).await?;
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(analyzer.config().port);
            info!("Starting API on port {}", port);
            api::serve(Arc::new(analyzer), port).await?;
        }
    }

    Ok(())
}

async fn analyze(
    analyzer: &NewsAnalyzer,
    company: &str,
    options: &AnalyzeOptions,
    json: bool,
) -> Result<()> {
    if company.trim().is_empty() {
        eprintln!("{}", "Please enter a company name.".bright_red());
        process::exit(2);
    }

    let report = match analyzer.analyze_company(company, options).await {
        Ok(report) => report,
        Err(e @ PipelineError::NoArticles(_)) => {
            eprintln!("{}", e.to_string().bright_yellow());
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &CompanyReport) {
    println!("\n{}", "═".repeat(100).bright_blue());
    println!(
        "{}  {}",
        "NEWS ANALYSIS".bright_blue(),
        report.company.bright_yellow()
    );
    println!("{}", "═".repeat(100).bright_blue());

    for (i, article) in report.articles.iter().enumerate() {
        let sentiment = article.sentiment.to_string();
        let colored_sentiment = match article.sentiment {
            newslens::sentiment::Sentiment::Positive => sentiment.bright_green(),
            newslens::sentiment::Sentiment::Negative => sentiment.bright_red(),
            newslens::sentiment::Sentiment::Neutral => sentiment.bright_white(),
        };

        println!("\n{} {}", format!("{}.", i + 1).bright_blue(), article.title.bold());
        println!("{}: {}", "Sentiment".bright_blue(), colored_sentiment);
        println!("{}: {}", "Topics".bright_blue(), article.topics.join(", "));
        println!("{}: {}", "Published".bright_blue(), article.published_display());
        println!("{}: {}", "Link".bright_blue(), article.link.dimmed());
        println!("{}: {}", "Summary".bright_blue(), article.summary);
        if !article.key_sentences.is_empty() {
            println!("{}: {}", "Key Sentences".bright_blue(), article.key_sentences);
        }
    }

    let counts = report.sentiment_counts();
    println!("\n{}", "Comparison".bright_blue());
    println!("{}", "─".repeat(80).dimmed());
    build_table(&report.articles).to_table().printstd();
    println!(
        "{} {}  {} {}  {} {}",
        "Positive:".bright_green(),
        counts.positive,
        "Negative:".bright_red(),
        counts.negative,
        "Neutral:".bright_white(),
        counts.neutral
    );

    println!("\n{}", "Comparative Sentiment Score".bright_blue());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", report.comparative_analysis);

    println!("\n{}", "Final Sentiment Analysis".bright_blue());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", report.final_sentiment);

    if let Some(ref translation) = report.translation {
        println!("\n{}", "Translation".bright_blue());
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", translation);
    }

    println!("\n{}: {}", "Audio".bright_blue(), report.audio);
}
