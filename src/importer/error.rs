// ==========================================
// Import module error types
// ==========================================
// Tool: thiserror derive macro
// ==========================================
// Only fatal conditions live here. Recoverable per-sheet and per-row
// conditions are carried in the import summaries instead of being
// raised (see importer::summary).
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// Import module error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== source file errors =====
    #[error("source not readable: {path}: {message}")]
    SourceUnreadable { path: String, message: String },

    #[error("unsupported source format: {0:?} (only .xlsx/.xls/.xlsm/.csv)")]
    UnsupportedFormat(String),

    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    // ===== database errors =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Repository(RepositoryError::from(err))
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
