use crate::adapters::{LLMAdapter, LLMRequest};
use crate::core::{PromptBuilder, PromptConfig, ReviewError};
use tracing::{debug, info};

pub struct ReviewRequester {
    prompt_builder: PromptBuilder,
}

impl ReviewRequester {
    pub fn new(prompt: PromptConfig) -> Self {
        Self {
            prompt_builder: PromptBuilder::new(prompt),
        }
    }

    /// Sends one chat request and returns the first generated message verbatim.
    pub async fn request_review(
        &self,
        llm: &dyn LLMAdapter,
        diff_text: &str,
    ) -> Result<String, ReviewError> {
        let (system_prompt, user_prompt) = self.prompt_builder.build_prompt(diff_text);
        info!("Requesting review from {}", llm.model_name());
        debug!("User prompt is {} characters", user_prompt.chars().count());

        let response = llm
            .complete(LLMRequest {
                system_prompt,
                user_prompt,
            })
            .await?;

        if let Some(model) = &response.model {
            debug!("Review generated by {}", model);
        }

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{StubLLM, StubReply};
    use crate::core::{DEFAULT_REVIEW_PREAMBLE, DEFAULT_SYSTEM_PROMPT};

    #[tokio::test]
    async fn returns_model_content_unmodified() {
        let llm = StubLLM::replying("  LGTM\n");
        let review = ReviewRequester::new(PromptConfig::default())
            .request_review(&llm, "a.rs:\n+x")
            .await
            .unwrap();

        assert_eq!(review, "  LGTM\n");
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(
            requests[0].user_prompt,
            format!("{}a.rs:\n+x", DEFAULT_REVIEW_PREAMBLE)
        );
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let llm = StubLLM::new(StubReply::Provider(500, "upstream down".to_string()));
        let err = ReviewRequester::new(PromptConfig::default())
            .request_review(&llm, "d")
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Provider { status: 500, .. }));
    }
}
