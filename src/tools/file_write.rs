use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;

use crate::errors::{AgentError, AgentResult};

use super::{required_str, ToolHandler};

/// Writes text to a file, creating parent directories as needed. Empty
/// content is valid; a missing `content` key is not.
pub struct FileWrite;

#[async_trait]
impl ToolHandler for FileWrite {
    fn name(&self) -> &str {
        "file_write"
    }

    fn description(&self) -> &str {
        "Write text content to a file at the given path, creating parent directories if needed"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "Text content to write"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn call(&self, params: Value) -> AgentResult<Value> {
        let file_path = required_str(&params, "file_path")?;
        let content = required_str(&params, "content")?;

        if let Some(parent) = Path::new(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AgentError::ExecutionError(format!(
                        "could not create directories for {}: {}",
                        file_path, e
                    ))
                })?;
            }
        }

        tokio::fs::write(file_path, content).await.map_err(|e| {
            AgentError::ExecutionError(format!("could not write {}: {}", file_path, e))
        })?;

        Ok(Value::String(format!(
            "Successfully wrote {} characters to {}",
            content.chars().count(),
            file_path
        )))
    }
}
