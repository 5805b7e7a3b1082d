use thiserror::Error;

/// Failures that end a review run. None of them are retried.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Missing or invalid required input (env vars, PR number, settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub failed while listing files or posting the comment.
    #[error("GitHub request failed: {0}")]
    Fetch(String),

    /// The LLM endpoint answered with a non-success status.
    #[error("LLM provider error ({status}): {body}")]
    Provider { status: u16, body: String },

    /// The LLM endpoint could not be reached or its body could not be read.
    #[error("failed to reach LLM provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to parse LLM response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("LLM response contained no choices")]
    EmptyResponse,
}

impl ReviewError {
    pub fn missing_env(names: &[&str]) -> Self {
        Self::Config(format!(
            "required environment variables not set: {}",
            names.join(", ")
        ))
    }
}
