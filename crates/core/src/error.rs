use std::path::PathBuf;

use frequent_transit::TransitError;

#[derive(Debug, thiserror::Error)]
pub enum FrequencyError {
    #[error("schedule lookup failed: {0}")]
    Schedule(#[from] TransitError),
    #[error("failed to access frequent map cache {}: {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed frequent map cache {}: {source}", .path.display())]
    CacheFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to read analysis config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, FrequencyError>;
