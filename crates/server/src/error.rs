use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use reviewrag_embed::EmbedError;
use reviewrag_vector::RetrievalError;

/// Retrieval failure surfaced over HTTP
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RetrievalError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            RetrievalError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RetrievalError::Embedding(EmbedError::Quota(_)) => StatusCode::TOO_MANY_REQUESTS,
            RetrievalError::Embedding(EmbedError::Transport(_)) => StatusCode::SERVICE_UNAVAILABLE,
            RetrievalError::Embedding(EmbedError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            RetrievalError::Embedding(EmbedError::Malformed(_)) => StatusCode::BAD_GATEWAY,
            RetrievalError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}
