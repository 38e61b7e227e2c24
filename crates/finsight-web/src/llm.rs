//! Builds the configured commentary backend.

use std::sync::Arc;
use std::time::Duration;

use finsight_llm::{GeminiBackend, LlmBackend, OpenAiCompatibleBackend};
use finsight_llm::commentary::GenerationSettings;
use secrecy::SecretString;

use crate::config::{LlmConfig, LlmProvider};

/// `Ok(None)` when the provider needs a key and none was found; the UI then
/// reports the missing credential instead of calling out.
pub fn build_backend(cfg: &LlmConfig, api_key: Option<SecretString>) -> anyhow::Result<Option<Arc<dyn LlmBackend>>> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = cfg.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    let backend: Arc<dyn LlmBackend> = match cfg.provider {
        LlmProvider::Gemini => {
            let Some(key) = api_key else {
                tracing::warn!("No {} found in the environment or {}", cfg.api_key_env, cfg.secrets_path);
                return Ok(None);
            };
            let mut b = GeminiBackend::new(key, cfg.model.clone()).with_client(client);
            if let Some(url) = &cfg.base_url {
                b = b.with_base_url(url.clone());
            }
            Arc::new(b)
        }
        LlmProvider::OpenaiCompatible => {
            let base_url = cfg
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434".to_string());
            Arc::new(OpenAiCompatibleBackend::new(base_url, cfg.model.clone(), api_key).with_client(client))
        }
    };

    tracing::info!(model = backend.model_id(), local = backend.is_local(), "LLM backend configured");
    Ok(Some(backend))
}

pub fn generation_settings(cfg: &LlmConfig) -> GenerationSettings {
    GenerationSettings {
        max_tokens: cfg.max_output_tokens,
        temperature: cfg.temperature,
    }
}
