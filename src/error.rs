use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Persistence(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`TranslateError`], for callers that branch
/// on the failure without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Unsupported,
    QuotaExceeded,
    ServiceUnavailable,
    Persistence,
    Other,
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            TranslateError::Unsupported(_) => ErrorKind::Unsupported,
            TranslateError::QuotaExceeded(_) => ErrorKind::QuotaExceeded,
            TranslateError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            TranslateError::Persistence(_) => ErrorKind::Persistence,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
