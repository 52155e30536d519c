//! LLM provider trait and types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for LLM providers.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: ProviderKind::Gemini.default_model().to_string(),
            max_tokens: 2048,
            temperature: 0.0,
        }
    }
}

/// Trait for the external inference oracle.
///
/// The oracle is a black-box text completion service: one prompt in, raw
/// text out. Transport failures surface as
/// [`RosettaError::OracleUnavailable`](crate::RosettaError::OracleUnavailable);
/// interpreting the text is the caller's job.
///
/// Implementations must be thread-safe (Send + Sync) so a provider can be
/// moved onto a blocking worker by the HTTP service.
pub trait LlmProvider: Send + Sync {
    /// Send a composed prompt and return the raw completion text.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

/// Which provider implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini API (requires GEMINI_API_KEY)
    #[default]
    Gemini,
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    Anthropic,
    /// Ollama local models
    Ollama,
    /// Mock provider for testing
    Mock,
}

impl ProviderKind {
    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
            ProviderKind::Ollama => "llama3.2",
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "ollama" | "local" => Ok(ProviderKind::Ollama),
            "mock" | "test" => Ok(ProviderKind::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: gemini, anthropic, ollama, or mock.",
                s
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Ollama => write!(f, "ollama"),
            ProviderKind::Mock => write!(f, "mock"),
        }
    }
}
