use thiserror::Error;

/// Errors surfaced by the Gemini gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API key rejected")]
    Unauthorized,
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("quota exhausted, retry later")]
    Quota,
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Maps a non-success HTTP status plus the error body Gemini returns.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::ModelNotFound(message),
            429 => Self::Quota,
            _ => Self::Api { status, message },
        }
    }

    /// True when the failure points at the configured credentials rather
    /// than a transient condition.
    #[must_use]
    pub fn is_credential_rejection(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::ModelNotFound(message) => message.contains("API key"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            GatewayError::from_status(401, String::new()),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            GatewayError::from_status(403, String::new()),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            GatewayError::from_status(429, String::new()),
            GatewayError::Quota
        ));
        assert!(matches!(
            GatewayError::from_status(500, "boom".into()),
            GatewayError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn not_found_with_key_message_counts_as_credential_rejection() {
        let err = GatewayError::from_status(404, "Requested entity was not found. API key expired".into());
        assert!(err.is_credential_rejection());

        let err = GatewayError::from_status(404, "model does not exist".into());
        assert!(!err.is_credential_rejection());
    }
}
