use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A capability declaration advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema for the parameters the tool accepts
    pub parameters: Value,
}

impl Tool {
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A request from the model to invoke a tool. Only ever produced by the
/// gateway's response parsing, never authored by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    /// Opaque identifier assigned by the backend
    pub id: String,
    /// The name of the tool to invoke
    pub name: String,
    /// Parsed arguments for the invocation
    pub arguments: Value,
}

impl ToolCallRequest {
    pub fn new<I, N>(id: I, name: N, arguments: Value) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// The textual outcome of one tool invocation, tagged with the id of the
/// request that produced it. Exactly one is produced per request in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
}

impl ToolResult {
    pub fn new<I, C>(tool_call_id: I, content: C) -> Self
    where
        I: Into<String>,
        C: Into<String>,
    {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}
