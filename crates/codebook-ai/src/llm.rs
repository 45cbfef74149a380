//! Chat-completion client for OpenAI-compatible services.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service returned no choices")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// Constrain the reply to a single JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    pub temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u64,
}

/// One request in, the reply text out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// `base_url` should be like `https://api.openai.com/v1`; a trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let url = self.endpoint();

        info!(url = %url, model = %request.model, "sending chat completion request");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(|e| self.classify_transport(e))?;
        extract_content(&body)
    }
}

impl OpenAiClient {
    fn classify_transport(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.config.timeout)
        } else {
            LlmError::Http(err)
        }
    }
}

/// Pull the first choice's content out of a completion body.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    if let Some(usage) = &parsed.usage {
        info!(tokens = usage.total_tokens, "chat completion finished");
    }
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyReply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wire_shape() {
        let req = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            response_format: Some(ResponseFormat::json_object()),
            temperature: 0.7,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["response_format"], json!({"type": "json_object"}));
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn response_format_omitted_when_none() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![],
            response_format: None,
            temperature: 0.0,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn extracts_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "{\"a\": 1}"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"total_tokens": 42}
        });
        assert_eq!(extract_content(&body.to_string()).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, LlmError::EmptyReply));
        let err = extract_content(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert!(matches!(err, LlmError::EmptyReply));
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let err = extract_content("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = ClientConfig::new("sk-test").with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::new("sk-secret");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
