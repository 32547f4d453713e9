use reviewrag_common::{AppConfig, EmbeddingProvider};
use std::sync::Arc;
use std::time::Duration;

use crate::embed::Embedder;
use crate::error::EmbedError;
use crate::hash::HashEmbedder;
use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAiEmbedder;
use crate::retry::RetryPolicy;

/// Build the embedder selected by `config`
pub fn embedder_from_config(config: &AppConfig) -> Result<Arc<dyn Embedder>, EmbedError> {
    let timeout = Duration::from_secs(config.embed_timeout_secs);
    let retry = RetryPolicy::new(config.embed_max_retries, Duration::from_secs(1));

    let embedder: Arc<dyn Embedder> = match config.embedding_provider {
        EmbeddingProvider::OpenAi => {
            let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
                EmbedError::Malformed("OPENAI_API_KEY is not set".to_string())
            })?;
            Arc::new(OpenAiEmbedder::with_options(
                api_key,
                &config.openai_base_url,
                &config.embedding_model,
                timeout,
                retry,
            )?)
        }
        EmbeddingProvider::Ollama => Arc::new(OllamaEmbedder::new(
            &config.ollama_base_url,
            &config.embedding_model,
            timeout,
            retry,
        )?),
        EmbeddingProvider::Hash => Arc::new(HashEmbedder::new(config.embedding_dim)),
    };

    Ok(embedder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_provider() {
        let config = AppConfig {
            embedding_provider: EmbeddingProvider::Hash,
            embedding_dim: 8,
            ..AppConfig::default()
        };
        let embedder = embedder_from_config(&config).unwrap();
        assert_eq!(embedder.model(), "sha256-8");
    }

    #[test]
    fn test_openai_without_key() {
        let config = AppConfig::default();
        assert!(embedder_from_config(&config).is_err());
    }

    #[test]
    fn test_openai_with_key() {
        let config = AppConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..AppConfig::default()
        };
        let embedder = embedder_from_config(&config).unwrap();
        assert_eq!(embedder.model(), "text-embedding-3-small");
    }
}
