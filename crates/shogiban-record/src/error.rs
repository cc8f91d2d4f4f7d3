use std::path::PathBuf;

/// Errors reading or writing game records
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Required keys missing or the move list cannot be decoded
    #[error("malformed record {}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistenceError::Io { path: path.into(), source }
    }
}

/// Errors decoding the JSON text of a record
#[derive(thiserror::Error, Debug)]
pub enum RecordFormatError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("move {index}: {reason}")]
    Move { index: usize, reason: String },
}
