use thiserror::Error;

/// Error types for bot delivery
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Missing or malformed bot settings; raised before any request
    #[error("Bot configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered but did not accept the message
    #[error("Bot API rejected the request (HTTP {status}): {description}")]
    Api { status: u16, description: String },
}

impl NotifyError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Result type using NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
