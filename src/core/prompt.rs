use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that reviews code diffs and provides suggestions.";
pub const DEFAULT_REVIEW_PREAMBLE: &str =
    "Please review the following code diff and provide improvement suggestions:\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub review_preamble: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            review_preamble: DEFAULT_REVIEW_PREAMBLE.to_string(),
        }
    }
}

pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Returns `(system_prompt, user_prompt)`. The diff text is appended verbatim.
    pub fn build_prompt(&self, diff_text: &str) -> (String, String) {
        let mut user_prompt =
            String::with_capacity(self.config.review_preamble.len() + diff_text.len());
        user_prompt.push_str(&self.config.review_preamble);
        user_prompt.push_str(diff_text);

        (self.config.system_prompt.clone(), user_prompt)
    }
}
