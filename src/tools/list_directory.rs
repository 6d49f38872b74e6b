use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::{AgentError, AgentResult};

use super::{required_str, ToolHandler};

/// Lists the entries of a directory, directories first, names compared
/// case-insensitively within each group.
pub struct ListDirectory;

#[async_trait]
impl ToolHandler for ListDirectory {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the files and subdirectories of a directory"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "directory_path": {
                    "type": "string",
                    "description": "Path to the directory to list"
                }
            },
            "required": ["directory_path"]
        })
    }

    async fn call(&self, params: Value) -> AgentResult<Value> {
        let directory_path = required_str(&params, "directory_path")?;

        let mut read_dir = tokio::fs::read_dir(directory_path).await.map_err(|e| {
            AgentError::ExecutionError(format!("could not list {}: {}", directory_path, e))
        })?;

        let mut entries: Vec<(bool, String, String)> = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.map_err(|e| {
            AgentError::ExecutionError(format!("could not list {}: {}", directory_path, e))
        })? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path().to_string_lossy().to_string();
            entries.push((is_dir, name, path));
        }

        entries.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.to_lowercase().cmp(&b.1.to_lowercase()))
        });

        let listing: Vec<Value> = entries
            .into_iter()
            .map(|(is_dir, name, path)| {
                json!({
                    "name": name,
                    "type": if is_dir { "directory" } else { "file" },
                    "path": path,
                })
            })
            .collect();

        Ok(Value::Array(listing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directories_sort_first() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("b.txt"), "").await.unwrap();
        tokio::fs::write(dir.path().join("Apple.txt"), "").await.unwrap();
        tokio::fs::create_dir(dir.path().join("zsub")).await.unwrap();

        let result = ListDirectory
            .call(json!({"directory_path": dir.path().to_str().unwrap()}))
            .await
            .unwrap();

        let listing = result.as_array().unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0]["name"], "zsub");
        assert_eq!(listing[0]["type"], "directory");
        assert_eq!(listing[1]["name"], "Apple.txt");
        assert_eq!(listing[2]["name"], "b.txt");
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let result = ListDirectory
            .call(json!({"directory_path": "/nonexistent/dir"}))
            .await;
        assert!(matches!(result, Err(AgentError::ExecutionError(_))));
    }
}
