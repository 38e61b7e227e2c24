//! API credential resolution.
//!
//! Order: the environment variable named by `llm.api_key_env`, then the same
//! key in the TOML secrets file at `llm.secrets_path`.

use secrecy::SecretString;
use std::path::Path;

use crate::config::LlmConfig;

pub fn resolve_api_key(cfg: &LlmConfig) -> Option<SecretString> {
    resolve_from(
        std::env::var(&cfg.api_key_env).ok(),
        Path::new(&cfg.secrets_path),
        &cfg.api_key_env,
    )
}

pub(crate) fn resolve_from(env_value: Option<String>, secrets_path: &Path, key: &str) -> Option<SecretString> {
    if let Some(v) = env_value.filter(|v| !v.trim().is_empty()) {
        return Some(SecretString::from(v.trim().to_string()));
    }

    let content = std::fs::read_to_string(secrets_path).ok()?;
    let table: toml::Table = match toml::from_str(&content) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(path = %secrets_path.display(), "Could not parse secrets file: {e}");
            return None;
        }
    };
    table
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::from(v.to_string()))
}
