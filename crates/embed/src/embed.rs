use async_trait::async_trait;

use crate::error::EmbedError;

/// Embedder converts text into a fixed-length float vector.
///
/// Every call on one instance must return vectors of the same length.
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Return the embedding vector for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Model identifier, for logs and stats.
    fn model(&self) -> &str;
}
