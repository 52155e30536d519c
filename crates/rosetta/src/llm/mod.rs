//! LLM provider integration for semantic name inference.
//!
//! The oracle receives one composed prompt per table and answers with a JSON
//! document proposing semantic names and descriptions per column. Everything
//! the oracle says is advisory: [`parse_inference_response`] never fails, and
//! columns it says nothing about keep their original names.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google models via API (requires `GEMINI_API_KEY`)
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//! - **Mock** - Scripted responses for tests and dry runs
//!
//! # Example
//!
//! ```no_run
//! use rosetta::llm::{create_provider, LlmConfig, ProviderKind};
//!
//! let provider = create_provider(ProviderKind::Ollama, LlmConfig::default(), None).unwrap();
//! let raw = provider.generate("...").unwrap();
//! ```

mod anthropic;
mod gemini;
mod mock;
mod ollama;
mod prompts;
mod provider;
mod response;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use prompts::{build_user_prompt, compose_prompt, system_prompt, PromptColumn};
pub use provider::{LlmConfig, LlmProvider, ProviderKind};
pub use response::{parse_inference_response, ColumnInference, InferenceOutcome};

use crate::error::{Result, RosettaError};

/// Build a provider of the given kind.
///
/// Hosted providers need an API key; a missing or blank key is a
/// configuration error. Ollama and the mock ignore the key.
pub fn create_provider(
    kind: ProviderKind,
    config: LlmConfig,
    api_key: Option<&str>,
) -> Result<Box<dyn LlmProvider>> {
    let key = api_key.map(str::trim).filter(|k| !k.is_empty());

    match kind {
        ProviderKind::Gemini => {
            let key = key.ok_or_else(|| {
                RosettaError::Config("GEMINI_API_KEY is required for the gemini provider".into())
            })?;
            Ok(Box::new(GeminiProvider::with_config(key, config)?))
        }
        ProviderKind::Anthropic => {
            let key = key.ok_or_else(|| {
                RosettaError::Config(
                    "ANTHROPIC_API_KEY is required for the anthropic provider".into(),
                )
            })?;
            Ok(Box::new(AnthropicProvider::with_config(key, config)?))
        }
        ProviderKind::Ollama => Ok(Box::new(OllamaProvider::with_config(config)?)),
        ProviderKind::Mock => Ok(Box::new(MockProvider::new())),
    }
}
