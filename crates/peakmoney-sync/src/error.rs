use thiserror::Error;

use crate::source::ContentKind;

#[derive(Debug, Error)]
pub enum SyncError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed {kind} document: {source}")]
    Decode {
        kind: ContentKind,
        source: serde_json::Error,
    },

    #[error("no query for {0}")]
    Unsupported(String),

    #[error("{0}")]
    Source(String),
}
