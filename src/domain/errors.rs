//! Core error definitions for the export pipeline.
//!
//! This module provides a centralized `ExportError` enum and a `Result` type
//! used throughout the application to handle database, I/O, and transfer
//! errors.

use thiserror::Error;

/// Error types encountered during an export run.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Source(#[from] postgres::Error),

    #[error("Export failed for {job}: {reason}")]
    Export { job: String, reason: String },

    #[error("Column {column} has unsupported type {type_name}")]
    UnsupportedType { column: String, type_name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transfer error: {0}")]
    Transfer(String),
}

impl From<suppaftp::FtpError> for ExportError {
    fn from(e: suppaftp::FtpError) -> Self {
        ExportError::Transfer(e.to_string())
    }
}

/// A specialized Result type for the export pipeline.
pub type Result<T> = std::result::Result<T, ExportError>;
