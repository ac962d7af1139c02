use thiserror::Error;

/// Errors returned by Instamojo operations.
#[derive(Debug, Error)]
pub enum InstamojoError {
    #[error("input error: {0}")]
    Input(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// The payment API answered with a non-success status.
    #[error("remote error: HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("http error: {0}")]
    Http(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T, E = InstamojoError> = std::result::Result<T, E>;
