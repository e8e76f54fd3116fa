use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("text generation failed: {0}")]
    Provider(String),

    #[error("text generation returned no text")]
    Empty,
}

#[async_trait]
pub trait TextGenerator: std::fmt::Debug + Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Generates text through `genai`; provider API keys come from the
/// environment (`GEMINI_API_KEY` for the default model).
pub struct GenAiWriter {
    client: genai::Client,
    model: String,
}

impl GenAiWriter {
    pub fn new(model: impl Into<String>) -> GenAiWriter {
        GenAiWriter {
            client: genai::Client::default(),
            model: model.into(),
        }
    }
}

impl std::fmt::Debug for GenAiWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiWriter")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextGenerator for GenAiWriter {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        tracing::debug!("Calling {} for generated content", self.model);

        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|err| GenerateError::Provider(err.to_string()))?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or(GenerateError::Empty)
    }
}

/// Prompt sent for a topic typed in by the admin.
pub fn blog_prompt(topic: &str) -> String {
    format!("{topic}{}", crate::blog::GENERATE_PROMPT_SUFFIX)
}

#[cfg(test)]
mod tests {
    #[test]
    fn blog_prompt_appends_instructions() {
        assert_eq!(
            super::blog_prompt("Rust lifetimes"),
            "Rust lifetimes Generate a blog content for this topic in simple text format"
        );
    }
}
