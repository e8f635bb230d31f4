//! Error types for the editor composition layer.
use thiserror::Error;

/// Top-level error type shared by storage strategies and the editor shell.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    #[error("Editor engine is not initialized")]
    EngineMissing,
}

impl From<redb::DatabaseError> for EditorError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for EditorError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for EditorError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for EditorError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for EditorError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}
