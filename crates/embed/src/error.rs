use thiserror::Error;

/// Failures of an embedding call.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Connection failure or server-side error
    #[error("embed: transport error: {0}")]
    Transport(String),

    /// Rate limit or exhausted quota
    #[error("embed: quota exceeded: {0}")]
    Quota(String),

    /// Request did not complete in time
    #[error("embed: request timed out: {0}")]
    Timeout(String),

    /// Rejected input or unusable response
    #[error("embed: malformed request or response: {0}")]
    Malformed(String),
}

impl EmbedError {
    /// Whether a retry with backoff can help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let msg = format!("HTTP {}: {}", status, body.into());
        match status {
            429 => Self::Quota(msg),
            408 => Self::Timeout(msg),
            400..=499 => Self::Malformed(msg),
            _ => Self::Transport(msg),
        }
    }
}

impl From<reqwest::Error> for EmbedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_status(status.as_u16(), e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(EmbedError::from_status(429, "slow down"), EmbedError::Quota(_)));
        assert!(matches!(EmbedError::from_status(408, ""), EmbedError::Timeout(_)));
        assert!(matches!(EmbedError::from_status(400, "bad input"), EmbedError::Malformed(_)));
        assert!(matches!(EmbedError::from_status(401, "no key"), EmbedError::Malformed(_)));
        assert!(matches!(EmbedError::from_status(502, "gateway"), EmbedError::Transport(_)));
    }

    #[test]
    fn test_is_retryable() {
        assert!(EmbedError::Transport("reset".into()).is_retryable());
        assert!(EmbedError::Timeout("30s".into()).is_retryable());
        assert!(!EmbedError::Quota("429".into()).is_retryable());
        assert!(!EmbedError::Malformed("empty".into()).is_retryable());
    }
}
