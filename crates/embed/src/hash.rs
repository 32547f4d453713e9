use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::embed::Embedder;
use crate::error::EmbedError;

/// Deterministic embedder that derives vectors from SHA-256 digests.
///
/// The vectors carry no semantics; equal texts map to equal vectors and
/// nothing else is guaranteed. Used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
    model: String,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            model: format!("sha256-{}", dim),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Vector for `text`, every component in [-1, 1]
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.dim);
        let mut block: u32 = 0;

        while out.len() < self.dim {
            let mut hasher = Sha256::new();
            hasher.update(block.to_le_bytes());
            hasher.update(text.as_bytes());
            let digest = hasher.finalize();

            for chunk in digest.chunks_exact(4) {
                if out.len() == self.dim {
                    break;
                }
                let bits = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                out.push((bits as f64 / u32::MAX as f64 * 2.0 - 1.0) as f32);
            }
            block += 1;
        }

        out
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(self.vector_for(text))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
