use crate::core::{FileDiff, ReviewError};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: usize = 100;
/// GitHub silently caps larger page sizes at this value.
pub const MAX_PER_PAGE: usize = 100;
const USER_AGENT: &str = "prscope";

/// Identifies one pull request on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// The two platform operations a review run needs.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Every changed file of the pull request, in platform order.
    async fn list_files(&self, pr: &PullRequestRef) -> Result<Vec<FileDiff>, ReviewError>;

    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> Result<(), ReviewError>;
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
    pub api_url: String,
    pub per_page: usize,
    pub timeout: Duration,
}

pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct CommentResponse {
    #[serde(default)]
    html_url: Option<String>,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            anyhow::bail!("GitHub token must not be empty");
        }
        if !(1..=MAX_PER_PAGE).contains(&config.per_page) {
            anyhow::bail!("per_page must be between 1 and {}", MAX_PER_PAGE);
        }
        if config.timeout.is_zero() {
            anyhow::bail!("timeout must be at least one second");
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    fn repo_url(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            pr.owner,
            pr.repo
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

async fn check_status(response: Response, action: &str) -> Result<Response, ReviewError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let detail = match response.text().await {
        Ok(body) => body.trim().to_string(),
        Err(err) => format!("<failed to read response body: {}>", err),
    };
    Err(ReviewError::Fetch(format!(
        "{} returned {}: {}",
        action, status, detail
    )))
}

#[async_trait]
impl PullRequestHost for GitHubClient {
    async fn list_files(&self, pr: &PullRequestRef) -> Result<Vec<FileDiff>, ReviewError> {
        let url = format!("{}/pulls/{}/files", self.repo_url(pr), pr.number);
        let per_page = self.config.per_page;
        let mut files = Vec::new();
        let mut page = 1usize;

        loop {
            debug!("Listing files of {} (page {})", pr, page);
            let response = self
                .get(&url)
                .query(&[("per_page", per_page), ("page", page)])
                .send()
                .await
                .map_err(|err| ReviewError::Fetch(format!("failed to list PR files: {}", err)))?;
            let response = check_status(response, "listing PR files").await?;

            let batch: Vec<FileDiff> = response.json().await.map_err(|err| {
                ReviewError::Fetch(format!("failed to parse PR file listing: {}", err))
            })?;

            let last_page = batch.len() < per_page;
            files.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(files)
    }

    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> Result<(), ReviewError> {
        let url = format!("{}/issues/{}/comments", self.repo_url(pr), pr.number);

        let response = self
            .post(&url)
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(|err| ReviewError::Fetch(format!("failed to create PR comment: {}", err)))?;
        let response = check_status(response, "creating PR comment").await?;

        if let Ok(created) = response.json::<CommentResponse>().await {
            if let Some(link) = created.html_url {
                debug!("Comment created at {}", link);
            }
        }

        Ok(())
    }
}
