use async_trait::async_trait;
use serde_json::{json, Value};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::config::Settings;
use crate::errors::{AgentError, AgentResult};

use super::{required_str, ToolHandler};

/// Runs a snippet of Python in a subprocess with a wall-clock timeout.
/// Failures of the snippet itself (non-zero exit, timeout) are reported in
/// the result payload, not as tool errors, so the model can see them.
pub struct CodeExecute {
    timeout: Duration,
}

impl CodeExecute {
    pub fn new(settings: &Settings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.code_execute_timeout),
        }
    }
}

#[async_trait]
impl ToolHandler for CodeExecute {
    fn name(&self) -> &str {
        "code_execute"
    }

    fn description(&self) -> &str {
        "Execute a Python code snippet and return its stdout, stderr and exit code"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Python source code to execute"
                }
            },
            "required": ["code"]
        })
    }

    async fn call(&self, params: Value) -> AgentResult<Value> {
        let code = required_str(&params, "code")?;

        let child = Command::new("python3")
            .arg("-c")
            .arg(code)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AgentError::ExecutionError(format!("could not start python3: {}", e)))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                AgentError::ExecutionError(format!("could not collect process output: {}", e))
            })?,
            Err(_) => {
                return Ok(json!({
                    "success": false,
                    "stdout": "",
                    "stderr": format!("Execution timed out after {}s", self.timeout.as_secs()),
                    "exit_code": -1,
                }));
            }
        };

        Ok(json!({
            "success": output.status.success(),
            "stdout": String::from_utf8_lossy(&output.stdout),
            "stderr": String::from_utf8_lossy(&output.stderr),
            "exit_code": output.status.code().unwrap_or(-1),
        }))
    }
}
