//! Project configuration (`rosetta_map.yaml`) and process settings.
//!
//! The configuration document names the database, the whitelisted tables,
//! the inference provider, and the privacy switches:
//!
//! ```yaml
//! project_name: rosetta-bridge
//! database:
//!   connection_string: ${DATABASE_URL}
//! whitelist_tables: [users, orders]
//! llm_config:
//!   provider: gemini
//!   model: gemini-1.5-flash
//!   temperature: 0.0
//! privacy:
//!   sample_rows: false
//!   scrub_pii: true
//! ```
//!
//! Secrets never live in the document. A whole-value `${NAME}` placeholder
//! in the connection string is resolved through [`Settings`], which is read
//! once at startup and passed down explicitly.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosettaError};
use crate::llm::{LlmConfig, ProviderKind};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "rosetta_map.yaml";

/// Default project name written by `init`.
pub const DEFAULT_PROJECT_NAME: &str = "rosetta-bridge";

static ENV_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\{([A-Z0-9_]+)\}$").unwrap());

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_max_tokens() -> usize {
    2048
}

fn default_true() -> bool {
    true
}

/// Where to read schema and samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection_string: String,
    /// How long SQLite waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Inference provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model name; when absent, the provider's default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: Some(ProviderKind::default().default_model().to_string()),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

impl LlmSettings {
    /// The configured model, or the provider's default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Provider configuration derived from these settings.
    pub fn to_llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model().to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// What data may be read and sent to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// Read example rows and include them in prompts.
    #[serde(default)]
    pub sample_rows: bool,
    /// Withhold samples that look like personal data.
    #[serde(default = "default_true")]
    pub scrub_pii: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            sample_rows: false,
            scrub_pii: true,
        }
    }
}

/// The `rosetta_map.yaml` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosettaMap {
    pub project_name: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub whitelist_tables: Vec<String>,
    #[serde(default)]
    pub llm_config: LlmSettings,
    #[serde(default)]
    pub privacy: PrivacyConfig,
}

/// Secrets and connection details taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Read settings from the process environment, after loading `.env`
    /// from the working directory if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            database_url: non_empty_var("DATABASE_URL"),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
        }
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn with_gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn with_anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    /// The API key a provider needs, if it needs one and it is set.
    pub fn api_key_for(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            ProviderKind::Ollama | ProviderKind::Mock => None,
        }
    }
}

/// Resolve a whole-value `${NAME}` placeholder.
///
/// Known names come from `settings`, anything else from the process
/// environment. An unresolvable placeholder is returned unchanged; values
/// that are not placeholders pass through.
pub fn expand_env_value(value: &str, settings: &Settings) -> String {
    let Some(captures) = ENV_PLACEHOLDER.captures(value) else {
        return value.to_string();
    };
    let name = &captures[1];

    let known = match name {
        "DATABASE_URL" => settings.database_url.clone(),
        "GEMINI_API_KEY" => settings.gemini_api_key.clone(),
        "ANTHROPIC_API_KEY" => settings.anthropic_api_key.clone(),
        _ => None,
    };
    known
        .or_else(|| std::env::var(name).ok())
        .unwrap_or_else(|| value.to_string())
}

/// Parse a configuration document and resolve its connection string.
pub fn parse_rosetta_map(yaml: &str, settings: &Settings) -> Result<RosettaMap> {
    let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if !document.is_mapping() {
        return Err(RosettaError::Config(
            "rosetta_map.yaml must be a mapping at the top level".to_string(),
        ));
    }

    let mut map: RosettaMap = serde_yaml::from_value(document)?;
    let connection = expand_env_value(&map.database.connection_string, settings);

    if connection.trim().is_empty() {
        return Err(RosettaError::Config(
            "database.connection_string is empty".to_string(),
        ));
    }
    if let Some(captures) = ENV_PLACEHOLDER.captures(&connection) {
        return Err(RosettaError::Config(format!(
            "{} must be set to connect to the database",
            &captures[1]
        )));
    }

    map.database.connection_string = connection;
    Ok(map)
}

/// Load `rosetta_map.yaml` from disk.
pub fn load_rosetta_map(path: impl AsRef<Path>, settings: &Settings) -> Result<RosettaMap> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| RosettaError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rosetta_map(&content, settings)
}

/// The document `init` writes.
pub fn default_rosetta_map(project_name: &str) -> RosettaMap {
    RosettaMap {
        project_name: project_name.to_string(),
        database: DatabaseConfig {
            connection_string: "${DATABASE_URL}".to_string(),
            busy_timeout_ms: default_busy_timeout_ms(),
        },
        whitelist_tables: Vec::new(),
        llm_config: LlmSettings::default(),
        privacy: PrivacyConfig::default(),
    }
}

/// Write the default document. Refuses to overwrite an existing file.
pub fn write_default_rosetta_map(path: impl AsRef<Path>, project_name: &str) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(RosettaError::Config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let yaml = serde_yaml::to_string(&default_rosetta_map(project_name))?;
    fs::write(path, yaml).map_err(|e| RosettaError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
