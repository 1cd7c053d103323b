use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP request failed with status code: {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse markup: {0}")]
    Parse(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize section: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
