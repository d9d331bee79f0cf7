// Declare submodules
mod analysis;
mod common;

pub use analysis::{comparative_analysis_prompt, final_sentiment_prompt};
pub use common::*;
