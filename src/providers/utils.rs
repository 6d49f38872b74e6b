use regex::Regex;
use serde_json::{json, Value};

use crate::errors::ProviderError;
use crate::models::message::{Message, Role};
use crate::models::tool::{Tool, ToolCallRequest};

use super::base::{Completion, Usage};

/// Convert internal messages to the OpenAI chat-completions message array,
/// shared by every OpenAI-compatible backend (OpenAI, Groq).
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    let mut messages_spec = Vec::new();

    for message in messages {
        let mut converted = match message.role {
            Role::User => json!({
                "role": "user",
                "content": message.content,
            }),
            Role::Assistant => json!({
                "role": "assistant",
                "content": message.content,
            }),
            Role::Tool => json!({
                "role": "tool",
                "content": message.content,
                "tool_call_id": message.tool_call_id,
            }),
        };

        if !message.tool_calls.is_empty() {
            let tool_calls: Vec<Value> = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": sanitize_function_name(&call.name),
                            "arguments": call.arguments.to_string(),
                        }
                    })
                })
                .collect();
            converted
                .as_object_mut()
                .unwrap()
                .insert("tool_calls".to_string(), json!(tool_calls));
        }

        messages_spec.push(converted);
    }

    messages_spec
}

/// Convert internal tool declarations to the OpenAI function-calling spec.
pub fn tools_to_openai_spec(tools: &[Tool]) -> Result<Vec<Value>, ProviderError> {
    let mut tool_names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(ProviderError::Configuration(format!(
                "Duplicate tool name: {}",
                tool.name
            )));
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": tool.parameters,
            }
        }));
    }

    Ok(result)
}

/// Parse an OpenAI chat-completions response body into the uniform result.
///
/// A malformed tool call (invalid function name, undecodable arguments) is a
/// gateway failure: requests handed to the engine are always well formed.
pub fn openai_response_to_completion(response: &Value) -> Result<Completion, ProviderError> {
    let choice = response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| ProviderError::Response("missing choices in response".to_string()))?;

    let message = choice
        .get("message")
        .ok_or_else(|| ProviderError::Response("missing message in choice".to_string()))?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string();

    let mut tool_calls = Vec::new();
    if let Some(calls) = message.get("tool_calls").and_then(|c| c.as_array()) {
        for call in calls {
            let id = call["id"].as_str().unwrap_or_default().to_string();
            let name = call["function"]["name"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            let arguments = call["function"]["arguments"]
                .as_str()
                .unwrap_or_default()
                .to_string();

            if !is_valid_function_name(&name) {
                return Err(ProviderError::Response(format!(
                    "function name '{}' has invalid characters, it must match [a-zA-Z0-9_-]+",
                    name
                )));
            }

            let arguments: Value = serde_json::from_str(&arguments).map_err(|e| {
                ProviderError::Response(format!(
                    "could not decode tool call arguments for id {}: {}",
                    id, e
                ))
            })?;

            tool_calls.push(ToolCallRequest::new(id, name, arguments));
        }
    }

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|f| f.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(Completion::new(
        content,
        tool_calls,
        finish_reason,
        get_openai_usage(response),
    ))
}

/// Extract token accounting from an OpenAI-style `usage` object. Fields the
/// backend omits stay `None`; a missing total is derived when both sides are
/// present.
pub fn get_openai_usage(response: &Value) -> Usage {
    let usage = match response.get("usage") {
        Some(usage) => usage,
        None => return Usage::default(),
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

pub fn sanitize_function_name(name: &str) -> String {
    let re = Regex::new(r"[^a-zA-Z0-9_-]").unwrap();
    re.replace_all(name, "_").to_string()
}

pub fn is_valid_function_name(name: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
    re.is_match(name)
}
