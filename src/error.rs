use std::path::PathBuf;

/// Failures reading or writing the keyword file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Keyword file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error on keyword file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Keyword file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize keywords: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::NotFound(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// Rejected input; the caller should not retry with the same content.
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Error al analizar el correo: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
