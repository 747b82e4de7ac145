use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing identifiers or querying a whitelist.
#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("invalid identifier {value:?}: {source}")]
    InvalidEncoding {
        value: String,
        #[source]
        source: bs58::decode::Error,
    },

    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<WhitelistError>,
    },

    /// The identifier was well formed but never part of the list.
    #[error("identifier {0} is not in the whitelist")]
    NotFound(String),

    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid 32-byte value: {0}")]
    InvalidDigest(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("artifact json failed: {0}")]
    Json(#[from] serde_json::Error),
}
