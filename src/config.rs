use crate::adapters::github::{self, GitHubConfig, PullRequestRef};
use crate::adapters::llm::{self, ModelConfig};
use crate::core::{
    PipelineOptions, PromptConfig, ReviewError, DEFAULT_COMMENT_HEADING, DEFAULT_MAX_DIFF_CHARS,
    DEFAULT_REVIEW_PREAMBLE, DEFAULT_SYSTEM_PROMPT,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_AI_KEY: &str = "AI_KEY";
pub const ENV_REPO_OWNER: &str = "REPO_OWNER";
pub const ENV_REPO_NAME: &str = "REPO_NAME";
pub const ENV_PR_NUM: &str = "PR_NUM";

const REQUIRED_ENV: [&str; 5] = [
    ENV_GITHUB_TOKEN,
    ENV_AI_KEY,
    ENV_REPO_OWNER,
    ENV_REPO_NAME,
    ENV_PR_NUM,
];

/// Optional tunables, read from `.prscope.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default = "default_review_preamble")]
    pub review_preamble: String,

    #[serde(default = "default_comment_heading")]
    pub comment_heading: String,

    /// Character cap on the diff text; 0 disables truncation.
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,

    /// HTTP timeout for GitHub and the model; must be at least 1.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for the file listing, 1 to 100.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            github_api_url: default_github_api_url(),
            system_prompt: default_system_prompt(),
            review_preamble: default_review_preamble(),
            comment_heading: default_comment_heading(),
            max_diff_chars: default_max_diff_chars(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        for name in [".prscope.yml", ".prscope.yaml"] {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".prscope.yml");
            if home_config.exists() {
                return Self::load_from(&home_config);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn merge_with_cli(
        &mut self,
        model: Option<String>,
        max_diff_chars: Option<usize>,
        timeout_secs: Option<u64>,
    ) {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(chars) = max_diff_chars {
            self.max_diff_chars = chars;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything a run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub ai_key: String,
    pub pull_request: PullRequestRef,
    pub settings: Settings,
}

impl Config {
    pub fn from_env(settings: Settings) -> Result<Self, ReviewError> {
        Self::from_lookup(|name| std::env::var(name).ok(), settings)
    }

    /// Reads the required variables through `lookup`. Every missing or blank
    /// variable is reported in one error.
    pub fn from_lookup<F>(lookup: F, settings: Settings) -> Result<Self, ReviewError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: Vec<Option<String>> = REQUIRED_ENV
            .iter()
            .map(|name| {
                lookup(name)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            })
            .collect();

        let missing: Vec<&str> = REQUIRED_ENV
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ReviewError::missing_env(&missing));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        let github_token = next();
        let ai_key = next();
        let owner = next();
        let repo = next();
        let pr_num = next();

        let number = parse_pr_number(&pr_num)?;

        if !(1..=github::MAX_PER_PAGE).contains(&settings.per_page) {
            return Err(ReviewError::Config(format!(
                "per_page must be between 1 and {}, got {}",
                github::MAX_PER_PAGE,
                settings.per_page
            )));
        }
        if settings.timeout_secs == 0 {
            return Err(ReviewError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            github_token,
            ai_key,
            pull_request: PullRequestRef {
                owner,
                repo,
                number,
            },
            settings,
        })
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model_name: self.settings.model.clone(),
            base_url: self.settings.base_url.clone(),
            timeout: self.settings.timeout(),
            ..ModelConfig::new(self.ai_key.clone())
        }
    }

    pub fn github_config(&self) -> GitHubConfig {
        GitHubConfig {
            token: self.github_token.clone(),
            api_url: self.settings.github_api_url.clone(),
            per_page: self.settings.per_page,
            timeout: self.settings.timeout(),
        }
    }

    pub fn pipeline_options(&self, dry_run: bool) -> PipelineOptions {
        PipelineOptions {
            max_diff_chars: self.settings.max_diff_chars,
            prompt: PromptConfig {
                system_prompt: self.settings.system_prompt.clone(),
                review_preamble: self.settings.review_preamble.clone(),
            },
            comment_heading: self.settings.comment_heading.clone(),
            dry_run,
        }
    }
}

fn parse_pr_number(value: &str) -> Result<u64, ReviewError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ReviewError::Config(format!(
            "invalid {}: pull request numbers start at 1",
            ENV_PR_NUM
        ))),
        Ok(number) => Ok(number),
        Err(err) => Err(ReviewError::Config(format!(
            "invalid {} {:?}: {}",
            ENV_PR_NUM, value, err
        ))),
    }
}

fn default_model() -> String {
    llm::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    llm::DEFAULT_BASE_URL.to_string()
}

fn default_github_api_url() -> String {
    github::DEFAULT_API_URL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_review_preamble() -> String {
    DEFAULT_REVIEW_PREAMBLE.to_string()
}

fn default_comment_heading() -> String {
    DEFAULT_COMMENT_HEADING.to_string()
}

fn default_max_diff_chars() -> usize {
    DEFAULT_MAX_DIFF_CHARS
}

fn default_timeout_secs() -> u64 {
    llm::DEFAULT_TIMEOUT_SECS
}

fn default_per_page() -> usize {
    github::DEFAULT_PER_PAGE
}
