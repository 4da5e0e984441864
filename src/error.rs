//! Error types for moto-onboard.

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Local form-validation failure. Raised before any network I/O; the
/// message is surfaced inline and the operation performs no side effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Backend rejected credentials or the caller has no usable session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Errors from the REST adapter.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A 401 from any endpoint. The session has already been invalidated
    /// by the time this is returned.
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-2xx response. `message` carries the backend's structured
    /// `detail` when present, else a generic fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Best-effort secondary upload failure. Logged and swallowed by the
/// workflow; never blocks forward progress.
#[derive(Debug, thiserror::Error)]
#[error("Upload of {what} failed: {reason}")]
pub struct UploadError {
    pub what: String,
    pub reason: String,
}

impl UploadError {
    pub fn new(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            reason: reason.into(),
        }
    }
}

/// Persisted session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from the global 401 invalidation path.
    /// Callers use this to distinguish "redirect to login" from inline
    /// form errors.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message() {
        let err = ValidationError::new("Preencha todos os campos da moto!");
        assert_eq!(err.to_string(), "Preencha todos os campos da moto!");
    }

    #[test]
    fn unauthorized_is_flagged() {
        let err = Error::Api(ApiError::Unauthorized);
        assert!(err.is_unauthorized());

        let err = Error::Api(ApiError::Status {
            status: 422,
            message: "invalid".into(),
        });
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn upload_error_names_target() {
        let err = UploadError::new("profile photo", "connection reset");
        assert_eq!(
            err.to_string(),
            "Upload of profile photo failed: connection reset"
        );
    }
}
