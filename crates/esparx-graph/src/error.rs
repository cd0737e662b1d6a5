//! Error types for e-SparX graph operations.
//!
//! This module provides the main error type [`EsparxError`]. Layering itself
//! never fails; errors come from reading input documents, loading
//! configuration and exporting results.

use std::io;

use thiserror::Error;

use crate::config::InputFormat;

/// The main error type for e-SparX graph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source document next to the JSON error so
/// that callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum EsparxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid {format} input: {err}")]
    Parse {
        err: serde_json::Error,
        format: InputFormat,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl EsparxError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(
        err: serde_json::Error,
        format: InputFormat,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            err,
            format,
            src: src.into(),
        }
    }
}
