use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::errors::{AgentError, AgentResult, ProviderError};
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolCallRequest, ToolResult};
use crate::providers::base::Provider;
use crate::tools::ToolHandler;

const DEFAULT_MAX_TOOL_ROUNDS: usize = 1;

/// A single reasoning unit: a system prompt, a registered tool set, and a
/// conversation history, driven through a shared model gateway.
///
/// `execute` runs a bounded loop: the model may request tools for at most
/// `max_tool_rounds` rounds before it must answer in text. Tool failures are
/// absorbed into the result text and never abort a task; gateway failures
/// propagate to the caller.
pub struct Agent {
    name: String,
    system_prompt: String,
    provider: Arc<dyn Provider>,
    tools: Vec<Box<dyn ToolHandler>>,
    history: Vec<Message>,
    max_tool_rounds: usize,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        provider: Arc<dyn Provider>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            provider,
            tools: Vec::new(),
            history: Vec::new(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Allow up to `rounds` tool rounds per `execute` call.
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Register a tool. Names must be unique within an agent.
    pub fn add_tool(&mut self, tool: Box<dyn ToolHandler>) -> AgentResult<()> {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            return Err(AgentError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Declarations for every registered tool, in registration order.
    pub fn tool_declarations(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.as_tool()).collect()
    }

    /// Clear conversation history. Tools and configuration are kept.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Run one task to completion and return the final text answer.
    ///
    /// Appends the user message, asks the gateway for a turn, dispatches any
    /// requested tool calls sequentially, and repeats until the model answers
    /// in text or the round budget runs out. All intermediate messages are
    /// recorded in history.
    pub async fn execute(
        &mut self,
        task: &str,
        context: Option<&HashMap<String, String>>,
    ) -> Result<String, ProviderError> {
        info!(agent = %self.name, "executing task");

        self.history.push(build_user_message(task, context));

        let declarations = self.tool_declarations();
        let mut completion = self
            .provider
            .complete(&self.system_prompt, &self.history, &declarations)
            .await?;

        let mut rounds = 0;
        while !completion.tool_calls.is_empty() && rounds < self.max_tool_rounds {
            rounds += 1;
            debug!(
                agent = %self.name,
                round = rounds,
                requested = completion.tool_calls.len(),
                "dispatching tool calls"
            );

            self.history.push(
                Message::assistant()
                    .with_text(&completion.content)
                    .with_tool_calls(completion.tool_calls.clone()),
            );

            for call in &completion.tool_calls {
                let result = self.dispatch_tool_call(call).await;
                self.history
                    .push(Message::tool(result.tool_call_id).with_text(result.content));
            }

            completion = self
                .provider
                .complete(&self.system_prompt, &self.history, &declarations)
                .await?;
        }

        // Final assistant turn is always recorded as plain text, even if the
        // model asked for more tools than the budget allows.
        self.history
            .push(Message::assistant().with_text(&completion.content));

        Ok(completion.content)
    }

    /// Run a single requested tool call. Never fails: an unknown tool or a
    /// failing handler produces a descriptive result the model can read.
    async fn dispatch_tool_call(&self, call: &ToolCallRequest) -> ToolResult {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            error!(agent = %self.name, tool = %call.name, "tool not found");
            return ToolResult::new(
                &call.id,
                AgentError::ToolNotFound(call.name.clone()).to_string(),
            );
        };

        match tool.call(call.arguments.clone()).await {
            Ok(value) => {
                let content = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                ToolResult::new(&call.id, content)
            }
            Err(e) => {
                error!(agent = %self.name, tool = %call.name, error = %e, "tool call failed");
                ToolResult::new(&call.id, format!("Error executing {}: {}", call.name, e))
            }
        }
    }
}

/// Render a task and its optional key/value context into one user message.
fn build_user_message(task: &str, context: Option<&HashMap<String, String>>) -> Message {
    let mut text = format!("Task: {}", task);

    if let Some(context) = context {
        if !context.is_empty() {
            text.push_str("\n\nContext:");
            let mut keys: Vec<&String> = context.keys().collect();
            keys.sort();
            for key in keys {
                text.push_str(&format!("\n- {}: {}", key, context[key]));
            }
        }
    }

    Message::user().with_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;
    use crate::providers::base::Completion;
    use crate::providers::mock::MockProvider;
    use async_trait::async_trait;
    use serde_json::json;

    struct Adder;

    #[async_trait]
    impl ToolHandler for Adder {
        fn name(&self) -> &str {
            "add"
        }

        fn description(&self) -> &str {
            "Add two numbers"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "number"},
                    "b": {"type": "number"}
                },
                "required": ["a", "b"]
            })
        }

        async fn call(&self, params: Value) -> AgentResult<Value> {
            let a = params["a"]
                .as_f64()
                .ok_or_else(|| AgentError::InvalidParameters("a is required".to_string()))?;
            let b = params["b"]
                .as_f64()
                .ok_or_else(|| AgentError::InvalidParameters("b is required".to_string()))?;
            Ok(json!(a + b))
        }
    }

    struct Broken;

    #[async_trait]
    impl ToolHandler for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        async fn call(&self, _params: Value) -> AgentResult<Value> {
            Err(AgentError::ExecutionError("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_execute_without_tools() {
        let provider = MockProvider::new(vec![Completion::text("All done")]);
        let mut agent = Agent::new("worker", "You are a worker.", provider.clone());

        let answer = agent.execute("say hi", None).await.unwrap();

        assert_eq!(answer, "All done");
        assert_eq!(agent.history().len(), 2);
        assert_eq!(agent.history()[0].role, Role::User);
        assert_eq!(agent.history()[1].role, Role::Assistant);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_with_tool_round() {
        let provider = MockProvider::new(vec![
            Completion::tool_use(vec![ToolCallRequest::new(
                "call_1",
                "add",
                json!({"a": 2, "b": 3}),
            )]),
            Completion::text("The answer is 5"),
        ]);
        let mut agent = Agent::new("worker", "You are a worker.", provider.clone());
        agent.add_tool(Box::new(Adder)).unwrap();

        let answer = agent.execute("what is 2 + 3?", None).await.unwrap();

        assert_eq!(answer, "The answer is 5");
        // user, assistant with tool call, tool result, final assistant
        assert_eq!(agent.history().len(), 4);
        assert_eq!(agent.history()[1].tool_calls.len(), 1);
        assert_eq!(agent.history()[2].role, Role::Tool);
        assert_eq!(agent.history()[2].content, "5.0");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_absorbed() {
        let provider = MockProvider::new(vec![
            Completion::tool_use(vec![ToolCallRequest::new("call_1", "missing", json!({}))]),
            Completion::text("done"),
        ]);
        let mut agent = Agent::new("worker", "prompt", provider);

        let answer = agent.execute("use a tool", None).await.unwrap();

        assert_eq!(answer, "done");
        let tool_message = &agent.history()[2];
        assert_eq!(tool_message.role, Role::Tool);
        assert!(tool_message.content.contains("Tool not found: missing"));
    }

    #[tokio::test]
    async fn test_failing_tool_absorbed() {
        let provider = MockProvider::new(vec![
            Completion::tool_use(vec![ToolCallRequest::new("call_1", "broken", json!({}))]),
            Completion::text("recovered"),
        ]);
        let mut agent = Agent::new("worker", "prompt", provider);
        agent.add_tool(Box::new(Broken)).unwrap();

        let answer = agent.execute("break", None).await.unwrap();

        assert_eq!(answer, "recovered");
        let tool_message = &agent.history()[2];
        assert!(tool_message.content.contains("Error executing broken"));
        assert!(tool_message.content.contains("disk on fire"));
    }

    #[tokio::test]
    async fn test_tool_batch_dispatched_in_order() {
        // One batch mixing a working, a missing and a failing tool: every
        // request gets exactly one result, in request order.
        let provider = MockProvider::new(vec![
            Completion::tool_use(vec![
                ToolCallRequest::new("call_1", "add", json!({"a": 1, "b": 2})),
                ToolCallRequest::new("call_2", "missing", json!({})),
                ToolCallRequest::new("call_3", "broken", json!({})),
            ]),
            Completion::text("handled all three"),
        ]);
        let mut agent = Agent::new("worker", "prompt", provider.clone());
        agent.add_tool(Box::new(Adder)).unwrap();
        agent.add_tool(Box::new(Broken)).unwrap();

        let answer = agent.execute("run the batch", None).await.unwrap();

        assert_eq!(answer, "handled all three");
        assert_eq!(provider.call_count(), 2);
        // user, assistant with three calls, three tool results, final assistant
        assert_eq!(agent.history().len(), 6);
        assert_eq!(agent.history()[1].tool_calls.len(), 3);

        for (offset, id) in ["call_1", "call_2", "call_3"].iter().enumerate() {
            let message = &agent.history()[2 + offset];
            assert_eq!(message.role, Role::Tool);
            assert_eq!(message.tool_call_id.as_deref(), Some(*id));
        }
        assert_eq!(agent.history()[2].content, "3.0");
        assert!(agent.history()[3].content.contains("Tool not found: missing"));
        assert!(agent.history()[4].content.contains("Error executing broken"));
    }

    #[tokio::test]
    async fn test_round_budget_stops_tool_loop() {
        // Model keeps asking for tools; after the single allowed round its
        // second completion is recorded as text even though it holds calls.
        let provider = MockProvider::new(vec![
            Completion::tool_use(vec![ToolCallRequest::new(
                "call_1",
                "add",
                json!({"a": 1, "b": 1}),
            )]),
            Completion::tool_use(vec![ToolCallRequest::new(
                "call_2",
                "add",
                json!({"a": 2, "b": 2}),
            )]),
        ]);
        let mut agent = Agent::new("worker", "prompt", provider.clone());
        agent.add_tool(Box::new(Adder)).unwrap();

        let answer = agent.execute("loop forever", None).await.unwrap();

        assert_eq!(answer, "");
        assert_eq!(provider.call_count(), 2);
        assert_eq!(agent.history().len(), 4);
        assert!(agent.history()[3].tool_calls.is_empty());
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let provider = MockProvider::new(vec![]);
        let mut agent = Agent::new("worker", "prompt", provider);

        agent.add_tool(Box::new(Adder)).unwrap();
        let result = agent.add_tool(Box::new(Adder));

        assert!(matches!(result, Err(AgentError::DuplicateTool(name)) if name == "add"));
        assert_eq!(agent.tool_declarations().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_history_keeps_tools() {
        let provider = MockProvider::new(vec![
            Completion::text("first"),
            Completion::text("second"),
        ]);
        let mut agent = Agent::new("worker", "prompt", provider);
        agent.add_tool(Box::new(Adder)).unwrap();

        agent.execute("one", None).await.unwrap();
        assert_eq!(agent.history().len(), 2);

        agent.reset();
        assert!(agent.history().is_empty());
        assert_eq!(agent.tool_declarations().len(), 1);

        agent.execute("two", None).await.unwrap();
        assert_eq!(agent.history().len(), 2);
    }

    #[test]
    fn test_build_user_message_with_context() {
        let mut context = HashMap::new();
        context.insert("plan".to_string(), "step 1".to_string());
        context.insert("budget".to_string(), "low".to_string());

        let message = build_user_message("do it", Some(&context));

        assert_eq!(
            message.content,
            "Task: do it\n\nContext:\n- budget: low\n- plan: step 1"
        );
    }

    #[test]
    fn test_build_user_message_without_context() {
        let message = build_user_message("do it", None);
        assert_eq!(message.content, "Task: do it");

        let empty = HashMap::new();
        let message = build_user_message("do it", Some(&empty));
        assert_eq!(message.content, "Task: do it");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        use crate::providers::mock::FailingProvider;

        let provider = FailingProvider::new("backend unavailable");
        let mut agent = Agent::new("worker", "prompt", provider);

        let result = agent.execute("anything", None).await;
        assert!(matches!(result, Err(ProviderError::Response(_))));
    }
}
