//! ReviewRag embedding providers
//!
//! `Embedder` capability plus OpenAI, Ollama and offline hash backends

mod embed;
mod error;
mod hash;
mod ollama;
mod openai;
mod provider;
mod retry;
mod types;

pub use embed::Embedder;
pub use error::EmbedError;
pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use provider::embedder_from_config;
pub use retry::RetryPolicy;
pub use types::{
    OllamaEmbedRequest, OllamaEmbedResponse, OpenAiEmbedRequest, OpenAiEmbedResponse, OpenAiEmbedding,
};
