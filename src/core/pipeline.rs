use crate::adapters::{LLMAdapter, PullRequestHost, PullRequestRef};
use crate::core::{DiffCollector, PromptConfig, ReviewError, ReviewRequester};
use tracing::info;

pub const DEFAULT_COMMENT_HEADING: &str = "### AI Code Review\n";

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_diff_chars: usize,
    pub prompt: PromptConfig,
    pub comment_heading: String,
    /// Build the comment but do not post it.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Nothing reviewable; the model was not called.
    NoDiffs,
    Posted {
        files: usize,
        truncated: bool,
    },
    DryRun {
        comment: String,
    },
}

/// Collect, review, post. Each stage runs only after the previous one succeeded.
pub async fn run_review(
    host: &dyn PullRequestHost,
    llm: &dyn LLMAdapter,
    pr: &PullRequestRef,
    options: &PipelineOptions,
) -> Result<ReviewOutcome, ReviewError> {
    let collector = DiffCollector::new(options.max_diff_chars);
    let bundle = match collector.collect(host, pr).await? {
        Some(bundle) => bundle,
        None => {
            info!("No diffs found in {}", pr);
            return Ok(ReviewOutcome::NoDiffs);
        }
    };

    let requester = ReviewRequester::new(options.prompt.clone());
    let review = requester.request_review(llm, bundle.text()).await?;
    let comment = format!("{}{}", options.comment_heading, review);

    if options.dry_run {
        return Ok(ReviewOutcome::DryRun { comment });
    }

    host.create_comment(pr, &comment).await?;
    info!("Review comment posted to {}", pr);

    Ok(ReviewOutcome::Posted {
        files: bundle.file_count(),
        truncated: bundle.is_truncated(),
    })
}
