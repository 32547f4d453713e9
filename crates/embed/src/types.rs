use serde::{Deserialize, Serialize};

/// OpenAI embeddings request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiEmbedRequest {
    /// Text to embed
    pub input: String,

    /// Model name (e.g., "text-embedding-3-small")
    pub model: String,
}

/// OpenAI embeddings response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEmbedResponse {
    pub data: Vec<OpenAiEmbedding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEmbedding {
    pub embedding: Vec<f32>,

    #[serde(default)]
    pub index: usize,
}

/// Ollama embedding request
#[derive(Debug, Clone, Serialize)]
pub struct OllamaEmbedRequest {
    /// Model name (e.g., "nomic-embed-text")
    pub model: String,

    /// Text to embed
    pub prompt: String,
}

/// Ollama embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaEmbedResponse {
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openai_response() {
        let body = r#"{
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.25, -0.5]}],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        }"#;
        let parsed: OpenAiEmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].embedding, vec![0.25, -0.5]);
    }

    #[test]
    fn test_serialize_ollama_request() {
        let request = OllamaEmbedRequest {
            model: "nomic-embed-text".to_string(),
            prompt: "too salty".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "too salty");
        assert_eq!(json["model"], "nomic-embed-text");
    }
}
