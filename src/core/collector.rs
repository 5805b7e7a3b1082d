use crate::adapters::{PullRequestHost, PullRequestRef};
use crate::core::{DiffBundle, ReviewError};
use tracing::{debug, info};

pub struct DiffCollector {
    max_diff_chars: usize,
}

impl DiffCollector {
    pub fn new(max_diff_chars: usize) -> Self {
        Self { max_diff_chars }
    }

    /// Fetches every changed file of `pr` and renders the capped bundle.
    /// `Ok(None)` means the PR has no textual patches to review.
    pub async fn collect(
        &self,
        host: &dyn PullRequestHost,
        pr: &PullRequestRef,
    ) -> Result<Option<DiffBundle>, ReviewError> {
        if pr.owner.trim().is_empty() || pr.repo.trim().is_empty() {
            return Err(ReviewError::Config(
                "repository owner and name must not be empty".to_string(),
            ));
        }
        if pr.number == 0 {
            return Err(ReviewError::Config(
                "pull request number must be positive".to_string(),
            ));
        }

        let files = host.list_files(pr).await?;
        info!("{} has {} changed files", pr, files.len());
        for file in files.iter().filter(|file| file.patch.is_none()) {
            debug!("Skipping {} (no textual patch)", file.filename);
        }

        let bundle = DiffBundle::from_files(&files, self.max_diff_chars);
        if let Some(bundle) = &bundle {
            if bundle.is_truncated() {
                info!(
                    "Diff text exceeds {} characters, truncating",
                    self.max_diff_chars
                );
            }
        }

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::StubHost;
    use crate::core::{FileDiff, TRUNCATION_MARKER};

    fn pr() -> PullRequestRef {
        PullRequestRef {
            owner: "octo".to_string(),
            repo: "widgets".to_string(),
            number: 3,
        }
    }

    #[tokio::test]
    async fn bundles_files_with_patches() {
        let host = StubHost::with_files(vec![
            FileDiff::new("src/main.rs", Some("+fn main() {}")),
            FileDiff::new("assets/logo.png", None),
        ]);

        let bundle = DiffCollector::new(3000)
            .collect(&host, &pr())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(bundle.text(), "src/main.rs:\n+fn main() {}");
        assert_eq!(bundle.file_count(), 1);
    }

    #[tokio::test]
    async fn binary_only_pr_yields_no_bundle() {
        let host = StubHost::with_files(vec![FileDiff::new("logo.png", None)]);
        let bundle = DiffCollector::new(3000).collect(&host, &pr()).await.unwrap();
        assert!(bundle.is_none());
    }

    #[tokio::test]
    async fn applies_cap() {
        let host = StubHost::with_files(vec![FileDiff::new("a", Some("x".repeat(100).as_str()))]);
        let bundle = DiffCollector::new(10)
            .collect(&host, &pr())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bundle.text(), format!("a:\nxxxxxxx{}", TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let host = StubHost::failing_listing("boom");
        let err = DiffCollector::new(3000).collect(&host, &pr()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Fetch(ref detail) if detail == "boom"));
    }

    #[tokio::test]
    async fn rejects_invalid_target_without_calling_host() {
        let host = StubHost::with_files(vec![]);
        let mut target = pr();
        target.number = 0;

        let err = DiffCollector::new(3000).collect(&host, &target).await.unwrap_err();

        assert!(matches!(err, ReviewError::Config(_)));
        assert_eq!(host.list_calls(), 0);
    }
}
