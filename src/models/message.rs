use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::tool::ToolCallRequest;

/// The author of a message in an agent's history.
///
/// There is no `System` variant: the system prompt is injected by the
/// gateway using each backend's own convention and is never stored in
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// A message to or from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub created: i64,
    pub content: String,
    /// Tool invocations requested by the model, present only on assistant
    /// messages recorded after a tool round.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Identifier of the originating request, present only on tool messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn new(role: Role) -> Self {
        Message {
            role,
            created: Utc::now().timestamp(),
            content: String::new(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create a new user message with the current timestamp
    pub fn user() -> Self {
        Message::new(Role::User)
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant() -> Self {
        Message::new(Role::Assistant)
    }

    /// Create a new tool result message for the given request id
    pub fn tool<S: Into<String>>(tool_call_id: S) -> Self {
        let mut message = Message::new(Role::Tool);
        message.tool_call_id = Some(tool_call_id.into());
        message
    }

    /// Set the text content of the message
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.content = text.into();
        self
    }

    /// Attach tool call requests to the message
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCallRequest>) -> Self {
        self.tool_calls = tool_calls;
        self
    }
}
