use crate::adapters::llm::{LLMAdapter, LLMRequest, LLMResponse, ModelConfig};
use crate::core::ReviewError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct OpenAIAdapter {
    client: Client,
    config: ModelConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: String,
}

impl ChatRequest {
    fn new(model: &str, request: LLMRequest) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: Role::User,
                    content: request.user_prompt,
                },
            ],
        }
    }
}

impl OpenAIAdapter {
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("OpenAI API key must not be empty");
        }
        if config.timeout.is_zero() {
            anyhow::bail!("timeout must be at least one second");
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse, ReviewError> {
        let chat_request = ChatRequest::new(&self.config.model_name, request);
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!("POST {} (model {})", url, self.config.model_name);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(ReviewError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ReviewError::Transport)?;

        if !status.is_success() {
            return Err(ReviewError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(ReviewError::Decode)?;

        let model = chat_response.model;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ReviewError::EmptyResponse)?;

        Ok(LLMResponse { content, model })
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
