use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures at or below the tool-invocation boundary. These are absorbed by
/// the agent engine and fed back to the model as tool result text, so they
/// never abort a running task.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures at or above the model gateway boundary. These abort the current
/// `execute`/`delegate` call and surface to the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid or missing backend selection or credentials. Raised at
    /// gateway construction, never recovered internally.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success response from the backend, with the raw error body.
    #[error("Provider request failed ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned 200 but the body did not match its documented
    /// response envelope.
    #[error("Unexpected provider response: {0}")]
    Response(String),
}
