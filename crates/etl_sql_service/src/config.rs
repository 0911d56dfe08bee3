//! Configuration management for the SQL generation service
//!
//! Every value is read once at startup from environment variables, with
//! fallback to defaults. The binary loads `.env` before calling
//! [`ServiceConfig::from_env`].

use etl_llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `API_KEY`: completion service credential (no default)
    /// - `HOST`: bind address (default: 0.0.0.0)
    /// - `PORT`: listen port (default: 8080)
    /// - `OPENAI_BASE_URL`: completion API base URL (default: https://api.openai.com/v1)
    /// - `OPENAI_MODEL`: model identifier (default: gpt-4-turbo)
    /// - `MAX_BODY_BYTES`: request payload limit (default: 10 MiB)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            api_key: non_empty("API_KEY"),
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: non_empty("OPENAI_MODEL").unwrap_or(defaults.model),
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
