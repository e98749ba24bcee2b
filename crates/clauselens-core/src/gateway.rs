use std::sync::Arc;

use clauselens_llm::LlmError;
use clauselens_llm::provider::{LlmProvider, Message};

use crate::prompt::Prompt;

/// Single-shot access to the configured model: one system and one user message per call.
#[derive(Debug)]
pub struct ModelGateway<P> {
    provider: Arc<P>,
}

impl<P> Clone for ModelGateway<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: LlmProvider> ModelGateway<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Send one completion request. No retry; empty text is a valid result.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let messages = [Message::system(system), Message::user(user)];
        self.provider.chat(&messages).await
    }

    /// [`complete`](Self::complete) for a built [`Prompt`].
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged.
    pub async fn execute(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.complete(&prompt.system, &prompt.user).await
    }
}
