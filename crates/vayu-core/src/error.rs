use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VayuError {
    #[error("failed to load scale from {path}: {reason}")]
    ScaleLoad { path: PathBuf, reason: String },

    #[error("invalid scale: {0}")]
    ScaleInvalid(String),

    #[error("invalid ranking dataset: {0}")]
    DatasetInvalid(String),

    #[error("invalid health advice data: {0}")]
    AdviceInvalid(String),

    #[error("no health advice for '{0}'")]
    UnknownCondition(String),

    #[error("air-quality feed returned an error: {0}")]
    FeedStatus(String),

    #[error("failed to parse feed: {0}")]
    FeedParse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("request to {url} failed with HTTP status {status}")]
    Http { status: u16, url: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
