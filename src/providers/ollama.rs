use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::models::message::{Message, Role};
use crate::models::tool::Tool;

use super::base::{Completion, Provider, Usage};
use super::configs::OllamaProviderConfig;

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "qwen2.5";

pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn messages_to_ollama_spec(system: &str, messages: &[Message]) -> Vec<Value> {
        let mut ollama_messages = vec![json!({
            "role": "system",
            "content": system
        })];

        for message in messages {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
                // Local models see tool output as plain user text
                Role::Tool => "user",
            };
            ollama_messages.push(json!({
                "role": role,
                "content": message.content
            }));
        }

        ollama_messages
    }

    fn get_usage(response: &Value) -> Usage {
        let input_tokens = response
            .get("prompt_eval_count")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);
        let output_tokens = response
            .get("eval_count")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);
        let total_tokens = match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        };

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));

        let response = self.client.post(&url).json(&payload).send().await?;

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
impl Provider for OllamaProvider {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        if !tools.is_empty() {
            tracing::warn!(
                model = %self.config.model,
                "ollama backend does not support tool calling, tool declarations dropped"
            );
        }

        let mut options = serde_json::Map::new();
        if let Some(temp) = self.config.temperature {
            options.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            options.insert("num_predict".to_string(), json!(tokens));
        }

        let mut payload = json!({
            "model": self.config.model,
            "messages": Self::messages_to_ollama_spec(system, messages),
            "stream": false
        });
        if !options.is_empty() {
            payload
                .as_object_mut()
                .unwrap()
                .insert("options".to_string(), Value::Object(options));
        }

        let response = self.post(payload).await?;

        let content = response
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                ProviderError::Response("missing message content in response".to_string())
            })?
            .to_string();

        Ok(Completion::new(
            content,
            Vec::new(),
            "stop".to_string(),
            Self::get_usage(&response),
        ))
    }
}
