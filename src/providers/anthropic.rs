use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::models::message::{Message, Role};
use crate::models::tool::{Tool, ToolCallRequest};

use super::base::{Completion, Provider, Usage};
use super::configs::AnthropicProviderConfig;

const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    /// Convert internal messages to Anthropic's content-block shape. Tool
    /// results become `tool_result` blocks inside user messages; requested
    /// calls become `tool_use` blocks inside assistant messages.
    fn messages_to_anthropic_spec(messages: &[Message]) -> Vec<Value> {
        let mut anthropic_messages = Vec::new();

        for message in messages {
            let converted = match message.role {
                Role::User => json!({
                    "role": "user",
                    "content": [{"type": "text", "text": message.content}]
                }),
                Role::Tool => json!({
                    "role": "user",
                    "content": [{
                        "type": "tool_result",
                        "tool_use_id": message.tool_call_id,
                        "content": message.content,
                    }]
                }),
                Role::Assistant => {
                    let mut blocks = Vec::new();
                    if !message.content.is_empty() {
                        blocks.push(json!({"type": "text", "text": message.content}));
                    }
                    for call in &message.tool_calls {
                        blocks.push(json!({
                            "type": "tool_use",
                            "id": call.id,
                            "name": call.name,
                            "input": call.arguments,
                        }));
                    }
                    json!({"role": "assistant", "content": blocks})
                }
            };
            anthropic_messages.push(converted);
        }

        anthropic_messages
    }

    fn tools_to_anthropic_spec(tools: &[Tool]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": tool.parameters,
                })
            })
            .collect()
    }

    fn get_usage(response: &Value) -> Usage {
        let usage = match response.get("usage") {
            Some(usage) => usage,
            None => return Usage::default(),
        };

        let input_tokens = usage
            .get("input_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);
        let output_tokens = usage
            .get("output_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);
        let total_tokens = match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        };

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    fn response_to_completion(response: &Value) -> Result<Completion, ProviderError> {
        let blocks = response
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                ProviderError::Response("missing content array in response".to_string())
            })?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for block in blocks {
            match block.get("type").and_then(|t| t.as_str()) {
                Some("text") => {
                    if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                        content.push_str(text);
                    }
                }
                Some("tool_use") => {
                    let id = block["id"].as_str().unwrap_or_default().to_string();
                    let name = block["name"].as_str().unwrap_or_default().to_string();
                    let arguments = block.get("input").cloned().unwrap_or(json!({}));
                    tool_calls.push(ToolCallRequest::new(id, name, arguments));
                }
                _ => {}
            }
        }

        let finish_reason = response
            .get("stop_reason")
            .and_then(|r| r.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Completion::new(
            content,
            tool_calls,
            finish_reason,
            Self::get_usage(response),
        ))
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(ProviderError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        let mut payload = json!({
            "model": self.config.model,
            "messages": Self::messages_to_anthropic_spec(messages),
            "max_tokens": self.config.max_tokens.unwrap_or(4096),
        });

        // System prompt is a top-level field, not a message
        if !system.is_empty() {
            payload
                .as_object_mut()
                .unwrap()
                .insert("system".to_string(), json!(system));
        }
        if !tools.is_empty() {
            payload
                .as_object_mut()
                .unwrap()
                .insert("tools".to_string(), json!(Self::tools_to_anthropic_spec(tools)));
        }
        if let Some(temp) = self.config.temperature {
            payload
                .as_object_mut()
                .unwrap()
                .insert("temperature".to_string(), json!(temp));
        }

        let response = self.post(payload).await?;
        Self::response_to_completion(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server(response_body: Value) -> (MockServer, AnthropicProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test_api_key"))
            .and(header("anthropic-version", ANTHROPIC_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
            .mount(&mock_server)
            .await;

        let config = AnthropicProviderConfig {
            host: mock_server.uri(),
            api_key: "test_api_key".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: Some(0.7),
            max_tokens: None,
        };

        let provider = AnthropicProvider::new(config).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn test_complete_basic() {
        let response_body = json!({
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "content": [{
                "type": "text",
                "text": "Hello! How can I assist you today?"
            }],
            "stop_reason": "end_turn",
            "usage": {
                "input_tokens": 12,
                "output_tokens": 15
            }
        });

        let (_, provider) = setup_mock_server(response_body).await;

        let messages = vec![Message::user().with_text("Hello?")];
        let completion = provider
            .complete("You are a helpful assistant.", &messages, &[])
            .await
            .unwrap();

        assert_eq!(completion.content, "Hello! How can I assist you today?");
        assert!(completion.tool_calls.is_empty());
        assert_eq!(completion.finish_reason, "end_turn");
        assert_eq!(completion.usage.input_tokens, Some(12));
        assert_eq!(completion.usage.output_tokens, Some(15));
        assert_eq!(completion.usage.total_tokens, Some(27));
    }

    #[tokio::test]
    async fn test_complete_tool_use() {
        let response_body = json!({
            "id": "msg_tool",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Let me check."},
                {
                    "type": "tool_use",
                    "id": "toolu_1",
                    "name": "file_read",
                    "input": {"file_path": "notes.txt"}
                }
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 30, "output_tokens": 12}
        });

        let (_, provider) = setup_mock_server(response_body).await;

        let tool = Tool::new(
            "file_read",
            "Reads the contents of a file",
            json!({
                "type": "object",
                "properties": {
                    "file_path": {"type": "string"}
                },
                "required": ["file_path"]
            }),
        );
        let messages = vec![Message::user().with_text("Read notes.txt")];

        let completion = provider
            .complete("You are a helpful assistant.", &messages, &[tool])
            .await
            .unwrap();

        assert_eq!(completion.content, "Let me check.");
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].id, "toolu_1");
        assert_eq!(completion.tool_calls[0].name, "file_read");
        assert_eq!(
            completion.tool_calls[0].arguments,
            json!({"file_path": "notes.txt"})
        );
        assert_eq!(completion.finish_reason, "tool_use");
    }

    #[test]
    fn test_tool_round_translation() {
        let messages = vec![
            Message::user().with_text("Read notes.txt"),
            Message::assistant().with_tool_calls(vec![ToolCallRequest::new(
                "toolu_1",
                "file_read",
                json!({"file_path": "notes.txt"}),
            )]),
            Message::tool("toolu_1").with_text("hello"),
        ];

        let spec = AnthropicProvider::messages_to_anthropic_spec(&messages);

        assert_eq!(spec.len(), 3);
        assert_eq!(spec[1]["role"], "assistant");
        assert_eq!(spec[1]["content"][0]["type"], "tool_use");
        assert_eq!(spec[1]["content"][0]["name"], "file_read");
        assert_eq!(spec[2]["role"], "user");
        assert_eq!(spec[2]["content"][0]["type"], "tool_result");
        assert_eq!(spec[2]["content"][0]["tool_use_id"], "toolu_1");
        assert_eq!(spec[2]["content"][0]["content"], "hello");
    }
}
