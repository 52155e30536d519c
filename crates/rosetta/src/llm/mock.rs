//! Mock LLM provider for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, RosettaError};

use super::provider::{LlmConfig, LlmProvider};

/// Response used when nothing has been scripted.
const EMPTY_RESPONSE: &str = r#"{"columns": []}"#;

/// Mock LLM provider that returns scripted responses and records prompts.
///
/// Responses are consumed in order; once the script runs out the last
/// response is repeated. A provider built with [`MockProvider::failing`]
/// returns [`RosettaError::OracleUnavailable`] for every call.
pub struct MockProvider {
    config: LlmConfig,
    script: Mutex<VecDeque<String>>,
    fallback: Mutex<String>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider that infers nothing.
    pub fn new() -> Self {
        Self::with_responses(Vec::<String>::new())
    }

    /// Always answer with the same text.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::with_responses(vec![response.into()])
    }

    /// Answer each call with the next scripted text.
    pub fn with_responses<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..LlmConfig::default()
            },
            script: Mutex::new(responses.into_iter().map(Into::into).collect()),
            fallback: Mutex::new(EMPTY_RESPONSE.to_string()),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose every call fails as unavailable.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(message) = &self.failure {
            return Err(RosettaError::OracleUnavailable(message.clone()));
        }

        let mut script = self
            .script
            .lock()
            .map_err(|_| RosettaError::OracleUnavailable("mock script poisoned".to_string()))?;
        let mut fallback = self
            .fallback
            .lock()
            .map_err(|_| RosettaError::OracleUnavailable("mock script poisoned".to_string()))?;

        match script.pop_front() {
            Some(next) => {
                *fallback = next.clone();
                Ok(next)
            }
            None => Ok(fallback.clone()),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
