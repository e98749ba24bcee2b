//! Test-only mock LLM provider.

use std::sync::{Arc, Mutex};

use crate::provider::{LlmProvider, Message, Role};

/// Scripted provider.
///
/// Responses are chosen by the first rule whose needle occurs in the system
/// prompt, then from the FIFO queue, then `default_response`. Every call is
/// recorded so tests can inspect the prompts that were sent.
#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    rules: Vec<(String, String)>,
    fail_rules: Vec<String>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
    pub default_response: String,
    pub fail_chat: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            rules: Vec::new(),
            fail_rules: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            fail_chat: false,
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    /// Answer with `response` whenever the system prompt contains `needle`.
    #[must_use]
    pub fn when_system_contains(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.rules.push((needle.into(), response.into()));
        self
    }

    /// Fail whenever the system prompt contains `needle`.
    #[must_use]
    pub fn fail_when_system_contains(mut self, needle: impl Into<String>) -> Self {
        self.fail_rules.push(needle.into());
        self
    }

    /// Snapshot of every message list passed to `chat`, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

fn system_text(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

impl LlmProvider for MockProvider {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, crate::LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.fail_chat {
            return Err(crate::LlmError::Other("mock LLM error".into()));
        }

        let system = system_text(messages);
        if self.fail_rules.iter().any(|n| system.contains(n.as_str())) {
            return Err(crate::LlmError::Unavailable);
        }
        if let Some((_, response)) = self.rules.iter().find(|(n, _)| system.contains(n.as_str())) {
            return Ok(response.clone());
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }
}
