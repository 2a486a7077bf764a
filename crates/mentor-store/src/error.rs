//! Error types for the entity store
//!
//! Two layers:
//! - [`ApiError`] for failures reported by the remote API
//! - [`StoreError`] for failed store operations, wrapping the API error

/// Failure reported by the remote API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request never reached the server or the connection dropped
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with an error status
    #[error("server returned {code}: {message}")]
    Status {
        /// Status code
        code: u16,
        /// Server message
        message: String,
    },

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Check if repeating the request could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { code, .. } => *code >= 500 || *code == 429,
            Self::Decode(_) => false,
        }
    }
}

/// Failed store operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Save attempted without an access token; nothing was sent
    #[error("no access token")]
    NoAccessToken,

    /// Batch fetch failed; `ids` were marked failed
    #[error("failed to load {} entities: {source}", .ids.len())]
    LoadFailed {
        /// Ids marked failed
        ids: Vec<String>,
        /// Remote failure
        #[source]
        source: ApiError,
    },

    /// Update failed; the entity under `id` was marked failed
    #[error("failed to save {id}: {source}")]
    SaveFailed {
        /// Id the save was issued under
        id: String,
        /// Remote failure
        #[source]
        source: ApiError,
    },
}

impl StoreError {
    /// Check if a user-initiated retry is meaningful
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NoAccessToken => false,
            Self::LoadFailed { source, .. } | Self::SaveFailed { source, .. } => {
                source.is_retryable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_retryable() {
        assert!(ApiError::Transport("reset".to_string()).is_retryable());
        assert!(ApiError::Status { code: 503, message: "down".to_string() }.is_retryable());
        assert!(!ApiError::Status { code: 400, message: "bad".to_string() }.is_retryable());
        assert!(!ApiError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::LoadFailed {
            ids: vec!["a".to_string(), "b".to_string()],
            source: ApiError::Transport("timeout".to_string()),
        };
        assert_eq!(err.to_string(), "failed to load 2 entities: transport error: timeout");
        assert!(err.is_retryable());
        assert!(!StoreError::NoAccessToken.is_retryable());
    }
}
