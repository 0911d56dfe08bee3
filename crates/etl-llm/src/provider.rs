use crate::models::ChatMessage;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, LLMError>;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one non-streaming chat completion and return the text of the
    /// first choice.
    ///
    /// # Arguments
    /// * `messages` - Chat messages, in order
    /// * `model` - Optional model override. If None, uses the provider's default model
    async fn chat_completion(&self, messages: &[ChatMessage], model: Option<&str>)
        -> Result<String>;
}
