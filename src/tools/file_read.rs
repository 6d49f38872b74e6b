use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::{AgentError, AgentResult};

use super::{required_str, ToolHandler};

/// Reads a file from disk and returns its contents as text.
pub struct FileRead;

#[async_trait]
impl ToolHandler for FileRead {
    fn name(&self) -> &str {
        "file_read"
    }

    fn description(&self) -> &str {
        "Read the contents of a text file at the given path"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file to read"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn call(&self, params: Value) -> AgentResult<Value> {
        let file_path = required_str(&params, "file_path")?;

        let contents = tokio::fs::read_to_string(file_path)
            .await
            .map_err(|e| AgentError::ExecutionError(format!("could not read {}: {}", file_path, e)))?;

        Ok(Value::String(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        tokio::fs::write(&path, "hello world").await.unwrap();

        let result = FileRead
            .call(json!({"file_path": path.to_str().unwrap()}))
            .await
            .unwrap();

        assert_eq!(result, Value::String("hello world".to_string()));
    }

    #[tokio::test]
    async fn test_missing_parameter() {
        let result = FileRead.call(json!({})).await;
        assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = FileRead
            .call(json!({"file_path": "/nonexistent/path.txt"}))
            .await;
        assert!(matches!(result, Err(AgentError::ExecutionError(_))));
    }
}
