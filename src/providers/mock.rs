use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::message::Message;
use crate::models::tool::Tool;

use super::base::{Completion, Provider};

/// Scripted backend for tests. Returns the queued completions in order and
/// counts how many times `complete` was called; once the queue is drained it
/// keeps answering with an empty text completion.
pub struct MockProvider {
    responses: Mutex<Vec<Completion>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(responses: Vec<Completion>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        _messages: &[Message],
        _tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Completion::text(""))
        } else {
            Ok(responses.remove(0))
        }
    }
}

/// Backend that fails every request, for exercising error propagation.
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            message: message.into(),
        })
    }
}

#[async_trait]
impl Provider for FailingProvider {
    async fn complete(
        &self,
        _system: &str,
        _messages: &[Message],
        _tools: &[Tool],
    ) -> Result<Completion, ProviderError> {
        Err(ProviderError::Response(self.message.clone()))
    }
}
