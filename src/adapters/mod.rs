pub mod github;
pub mod llm;
pub mod openai;

pub use github::{GitHubClient, PullRequestHost, PullRequestRef};
pub use llm::{LLMAdapter, LLMRequest};
pub use openai::OpenAIAdapter;
