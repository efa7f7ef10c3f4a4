//! Anthropic Messages API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::ContentModel;
use crate::error::{PortalError, PortalResult};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl AnthropicClient {
    /// Create a client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String, timeout: Duration) -> PortalResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PortalError::ai("Failed to build HTTP client", Some(Box::new(e)))
        })?;

        Ok(Self {
            client,
            api_key,
            model,
            endpoint: MESSAGES_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Concatenate the text blocks of a response body.
fn extract_text(response: MessagesResponse) -> PortalResult<String> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(PortalError::ai("Response contained no text content", None));
    }
    Ok(text)
}

#[async_trait]
impl ContentModel for AnthropicClient {
    async fn complete(&self, prompt: &str) -> PortalResult<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Request to AI model timed out"
                } else {
                    "Request to AI model failed"
                };
                PortalError::ai(message, Some(Box::new(e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PortalError::ai(
                format!("AI model returned status {}: {detail}", status.as_u16()),
                None,
            ));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            PortalError::ai("Malformed response from AI model", Some(Box::new(e)))
        })?;

        debug!(model = %self.model, blocks = parsed.content.len(), "AI response received");
        extract_text(parsed)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = MessagesRequest {
            model: "claude-test",
            max_tokens: 10,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"A"},{"type":"tool_use"},{"type":"text","text":"B"}]}"#,
        )
        .unwrap_or(MessagesResponse { content: vec![] });
        assert_eq!(extract_text(response).ok().as_deref(), Some("A\nB"));
    }

    #[test]
    fn test_extract_text_rejects_empty() {
        let response = MessagesResponse { content: vec![] };
        assert!(extract_text(response).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = AnthropicClient::new(
            "key".to_string(),
            "claude-test".to_string(),
            Duration::from_millis(200),
        )
        .map(|c| c.with_endpoint("http://127.0.0.1:9/v1/messages"));

        if let Ok(client) = client {
            let result = client.complete("hello").await;
            assert!(matches!(result, Err(PortalError::AiError { .. })));
        }
    }
}
