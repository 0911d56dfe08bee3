use async_trait::async_trait;
use reqwest::Client;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::provider::{LLMError, LLMProvider, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// OpenAI-compatible chat completion client.
///
/// The underlying client carries no timeout and no retry policy: a request
/// waits until the upstream answers or the transport gives up.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(LLMError::Auth("API_KEY is not configured".to_string()));
        }

        let model_to_use = model.unwrap_or(&self.model);
        let body = ChatCompletionRequest {
            model: model_to_use.to_string(),
            messages: messages.to_vec(),
        };

        log::debug!(
            "Sending chat completion: model={}, messages={}",
            model_to_use,
            messages.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            log::error!("Chat completion failed: HTTP {}", status);
            return Err(LLMError::Api(format!("HTTP {}: {}", status, text)));
        }

        let text = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&text)?;

        completion
            .first_content()
            .ok_or_else(|| LLMError::Api("completion response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1234567890,
            "model": "gpt-4-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_new_provider() {
        let provider = OpenAIProvider::new("test_key");
        assert_eq!(provider.api_key, "test_key");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(provider.model, "gpt-4-turbo");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let provider = OpenAIProvider::new("test_key").with_base_url("http://localhost:9000/v1/");
        assert_eq!(provider.base_url, "http://localhost:9000/v1");
    }

    #[tokio::test]
    async fn chat_completion_posts_messages_and_returns_first_choice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test_key"))
            .and(body_partial_json(json!({
                "model": "gpt-4-turbo",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "{\"steps\":[]}"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(
                "{\"sql\": \"SELECT 1;\"}"
            ))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("test_key").with_base_url(mock_server.uri());
        let messages = vec![
            ChatMessage::system("sys"),
            ChatMessage::user("{\"steps\":[]}"),
        ];

        let content = provider.chat_completion(&messages, None).await.unwrap();
        assert_eq!(content, "{\"sql\": \"SELECT 1;\"}");
    }

    #[tokio::test]
    async fn chat_completion_uses_model_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "gpt-4o"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("ok"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("test_key").with_base_url(mock_server.uri());
        let content = provider
            .chat_completion(&[ChatMessage::user("hi")], Some("gpt-4o"))
            .await
            .unwrap();
        assert_eq!(content, "ok");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limited"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("test_key").with_base_url(mock_server.uri());
        let err = provider
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();

        match err {
            LLMError::Api(msg) => {
                assert!(msg.starts_with("HTTP 429"), "unexpected message: {msg}");
                assert!(msg.contains("rate limited"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_content_is_returned_as_empty_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("test_key").with_base_url(mock_server.uri());
        let content = provider
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap();
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn empty_choices_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("test_key").with_base_url(mock_server.uri());
        let err = provider
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::Api(_)));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("  ").with_base_url(mock_server.uri());
        let err = provider
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Authentication error: API_KEY is not configured");
    }
}
