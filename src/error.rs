use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not write snapshot of '{document}': {message}")]
    Snapshot { document: String, message: String },

    #[error("Document '{0}' has no saved version to compare against")]
    NoSavedVersion(String),

    #[error("Failed to execute command: {0}")]
    Spawn(String),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Action not found: {0}")]
    ActionNotFound(String),

    #[error("No document to compare with: {0}")]
    NoTarget(String),

    #[error("Config directory could not be created: {}", .0.display())]
    ConfigDirectory(PathBuf),
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::SerializationError(err.to_string())
    }
}
