use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::embed::Embedder;
use crate::error::EmbedError;
use crate::retry::RetryPolicy;
use crate::types::{OllamaEmbedRequest, OllamaEmbedResponse};

/// Embedder backed by a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: Client,
    retry: RetryPolicy,
}

impl OllamaEmbedder {
    /// Create new Ollama embedder
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, EmbedError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbedError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama embedder initialized: {}", base_url);
        Ok(Self {
            base_url,
            model: model.into(),
            client,
            retry,
        })
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &OllamaEmbedRequest) -> Result<Vec<f32>, EmbedError> {
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedError::from_status(status.as_u16(), body));
        }

        let result: OllamaEmbedResponse = response.json().await?;

        if result.embedding.is_empty() {
            return Err(EmbedError::Malformed("Empty embedding from Ollama".to_string()));
        }

        Ok(result.embedding)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::Malformed("empty input".to_string()));
        }

        let url = format!("{}/api/embeddings", self.base_url);

        debug!("Generating embedding - Model: {}, Text length: {}", self.model, text.len());

        let request = OllamaEmbedRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let embedding = self
            .retry
            .run("Ollama embedding request", || self.try_embed(&url, &request))
            .await?;

        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_embedder() -> OllamaEmbedder {
        // Port 9 (discard) is closed on CI hosts; connection is refused.
        OllamaEmbedder::new(
            "http://127.0.0.1:9/",
            "nomic-embed-text",
            Duration::from_secs(5),
            RetryPolicy::none(),
        )
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let embedder = unreachable_embedder();
        assert_eq!(embedder.base_url, "http://127.0.0.1:9");
        assert_eq!(embedder.model(), "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let err = unreachable_embedder().embed("too salty").await.unwrap_err();
        assert!(matches!(err, EmbedError::Transport(_)), "got {err}");
    }

    #[tokio::test]
    async fn test_blank_input_is_malformed() {
        // Rejected before any request, so the closed port never surfaces.
        let err = unreachable_embedder().embed(" \t\n ").await.unwrap_err();
        assert!(matches!(err, EmbedError::Malformed(_)), "got {err}");
        assert!(!err.is_retryable());
    }
}
