use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AgentResult;
use crate::models::tool::Tool;

pub mod code_execute;
pub mod file_read;
pub mod file_write;
pub mod list_directory;
pub mod web_search;

pub use code_execute::CodeExecute;
pub use file_read::FileRead;
pub use file_write::FileWrite;
pub use list_directory::ListDirectory;
pub use web_search::WebSearch;

/// A callable capability an agent can register. The declaration side
/// (`name`, `description`, `parameters`) is advertised to the model; the
/// execution side (`call`) runs when the model requests it.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema describing the accepted parameters.
    fn parameters(&self) -> Value;

    async fn call(&self, params: Value) -> AgentResult<Value>;

    /// The declaration handed to the model gateway.
    fn as_tool(&self) -> Tool {
        Tool::new(self.name(), self.description(), self.parameters())
    }
}

/// Pull a required string parameter out of a tool call's arguments.
pub(crate) fn required_str<'a>(params: &'a Value, key: &str) -> AgentResult<&'a str> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| crate::errors::AgentError::InvalidParameters(format!("{} is required", key)))
}
