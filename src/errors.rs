//! Unified application error type.
//! All modules (db, core, cli, import, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors (user input, aborts the operation)
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid election type: {0}")]
    InvalidElectionType(String),

    #[error("Invalid election status: {0}")]
    InvalidStatus(String),

    #[error("Invalid voting channel: {0}")]
    InvalidChannel(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Spreadsheet ingestion (file-level, nothing persisted)
    // ---------------------------
    #[error("Cannot read spreadsheet: {0}")]
    SheetRead(String),

    #[error("File missing columns: {0}")]
    MissingColumns(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
