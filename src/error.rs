#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse {path} as JSON: {source}")]
    ManifestParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid event payload: {0}")]
    EventPayloadError(#[source] serde_json::Error),

    #[error("Unsupported event: {event} (action: {action})")]
    UnsupportedEvent { event: String, action: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
