use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::embed::Embedder;
use crate::error::EmbedError;
use crate::retry::RetryPolicy;
use crate::types::{OpenAiEmbedRequest, OpenAiEmbedResponse};

/// OpenAI embedding models.
pub const MODEL_OPENAI_3_SMALL: &str = "text-embedding-3-small";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Embedder backed by the OpenAI `/embeddings` API.
///
/// Any OpenAI-compatible provider works through `base_url`.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiEmbedder {
    /// Create a client for the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, EmbedError> {
        Self::with_options(
            api_key,
            OPENAI_BASE_URL,
            MODEL_OPENAI_3_SMALL,
            timeout,
            RetryPolicy::default(),
        )
    }

    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, EmbedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbedError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        info!("OpenAI embedder initialized: {} ({})", base_url, model);
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            model,
            retry,
        })
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &OpenAiEmbedRequest) -> Result<Vec<f32>, EmbedError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedError::from_status(status.as_u16(), body));
        }

        let result: OpenAiEmbedResponse = response.json().await?;

        let embedding = result
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
            .unwrap_or_default();

        if embedding.is_empty() {
            return Err(EmbedError::Malformed("Empty embedding from OpenAI".to_string()));
        }

        Ok(embedding)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::Malformed("empty input".to_string()));
        }

        let url = format!("{}/embeddings", self.base_url);
        let request = OpenAiEmbedRequest {
            input: text.to_string(),
            model: self.model.clone(),
        };

        debug!("Generating embedding - Model: {}, Text length: {}", self.model, text.len());

        let embedding = self
            .retry
            .run("OpenAI embedding request", || self.try_embed(&url, &request))
            .await?;

        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
