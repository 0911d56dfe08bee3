pub mod models;
pub mod openai;
pub mod provider;

pub use models::*;
pub use openai::OpenAIProvider;
pub use provider::{LLMError, LLMProvider, Result};
