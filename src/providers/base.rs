use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolCallRequest};

/// Token accounting reported by a backend. Any field a backend does not
/// report stays `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// The uniform generation result every backend is normalized into. The rest
/// of the engine never sees a provider wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
    pub finish_reason: String,
    pub usage: Usage,
}

impl Completion {
    pub fn new(
        content: String,
        tool_calls: Vec<ToolCallRequest>,
        finish_reason: String,
        usage: Usage,
    ) -> Self {
        Self {
            content,
            tool_calls,
            finish_reason,
            usage,
        }
    }

    /// Plain text completion, mainly useful in tests.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content.into(), Vec::new(), "stop".to_string(), Usage::default())
    }

    /// Completion that requests the given tool calls.
    pub fn tool_use(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self::new(
            String::new(),
            tool_calls,
            "tool_calls".to_string(),
            Usage::default(),
        )
    }
}

/// Base trait for a model backend. Implementations translate the uniform
/// request into their wire format, issue it, and normalize the reply.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next turn for `messages` under `system`, advertising
    /// `tools` to the model when the backend supports tool calling.
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<Completion, ProviderError>;
}
