//! Configuration loading for finsight.
//! Reads finsight.toml from the current directory or path in FINSIGHT_CONFIG env var.

use finsight_common::Locale;
use finsight_statement::LabelKeys;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub labels: LabelKeys,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Derived statements kept for the analyze step.
    #[serde(default = "default_cache_entries")]
    pub cache_entries: usize,
}

fn default_bind()             -> String { "127.0.0.1:3001".to_string() }
fn default_max_upload_bytes() -> usize  { 10 * 1024 * 1024 }
fn default_cache_entries()    -> usize  { 32 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
            cache_entries: default_cache_entries(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    Gemini,
    OpenaiCompatible,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    #[serde(default = "default_model")]
    pub model: String,
    /// Overrides the provider's public endpoint.
    pub base_url: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_secrets_path")]
    pub secrets_path: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Whole-request timeout; unset leaves the HTTP client default.
    pub timeout_secs: Option<u64>,
}

fn default_provider()          -> LlmProvider { LlmProvider::Gemini }
fn default_model()             -> String { "gemini-1.5-flash".to_string() }
fn default_api_key_env()       -> String { "GEMINI_API_KEY".to_string() }
fn default_secrets_path()      -> String { "secrets.toml".to_string() }
fn default_max_output_tokens() -> u32    { 2048 }
fn default_temperature()       -> f32    { 0.4 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            secrets_path: default_secrets_path(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
}


impl Config {
    /// Load configuration from finsight.toml.
    /// Checks FINSIGHT_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("FINSIGHT_CONFIG")
            .unwrap_or_else(|_| "finsight.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy finsight.example.toml to finsight.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.server.cache_entries == 0 {
            anyhow::bail!("server.cache_entries must be at least 1");
        }
        Ok(config)
    }
}
