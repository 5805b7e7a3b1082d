pub mod collector;
pub mod diff_bundle;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod review;

#[cfg(test)]
pub(crate) mod test_support;

pub use collector::DiffCollector;
pub use diff_bundle::{DiffBundle, FileDiff, DEFAULT_MAX_DIFF_CHARS, TRUNCATION_MARKER};
pub use error::ReviewError;
pub use pipeline::{run_review, PipelineOptions, ReviewOutcome, DEFAULT_COMMENT_HEADING};
pub use prompt::{PromptBuilder, PromptConfig, DEFAULT_REVIEW_PREAMBLE, DEFAULT_SYSTEM_PROMPT};
pub use review::ReviewRequester;
