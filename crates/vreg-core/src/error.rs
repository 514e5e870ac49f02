//! Error types for the vreg-core library.

use thiserror::Error;

use crate::models::fields::{FieldName, ValueType};

/// Main error type for the vreg library.
#[derive(Error, Debug)]
pub enum VregError {
    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the boundary to the external OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The configured OCR program is not installed or not on PATH.
    #[error("backend not available: {0}")]
    BackendNotAvailable(String),

    /// The OCR program ran but reported a failure.
    #[error("OCR failed: {0}")]
    Failed(String),

    /// The OCR program produced output that could not be read as text lines.
    #[error("invalid OCR output: {0}")]
    InvalidOutput(String),

    /// The input image could not be opened or decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// I/O error while talking to the OCR program.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to registration field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A single detector failed on a single line.
    #[error("detector {detector} failed on line {line}: {reason}")]
    Detector {
        detector: &'static str,
        line: usize,
        reason: String,
    },

    /// Failed to parse a matched value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: FieldName, value: String },

    /// A candidate value does not have the type the catalog declares.
    #[error("{field} expects {expected}, got {found}")]
    TypeMismatch {
        field: FieldName,
        expected: ValueType,
        found: ValueType,
    },
}

/// Result type for the vreg library.
pub type Result<T> = std::result::Result<T, VregError>;
