//! Core library for Korean vehicle registration certificate OCR.
//!
//! This crate provides:
//! - Line classification into registration fields (plate, VIN, owner, dates, ...)
//! - Per-field conflict resolution over the collected candidates
//! - A stateless extraction pipeline producing a flat JSON-compatible record
//! - Validation and a grouped owner/vehicle summary of the extracted fields
//! - The boundary to an external OCR engine that turns images into text lines

pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod validation;

pub use error::{ExtractionError, OcrError, Result, VregError};
pub use extraction::{ExtractionPipeline, FieldResolver, LineClassifier};
pub use models::config::{ExtractionConfig, OcrConfig, VregConfig};
pub use models::fields::{ConflictPolicy, FieldCatalog, FieldName, FieldValue, ValueType};
pub use models::result::{ExtractionResult, FieldCandidate, StructuredFields, TextLine};
pub use models::summary::{FuelType, RegistrationSummary};
pub use ocr::{CommandBackend, OcrBackend, OcrBackendKind, OcrOutput, TranscriptBackend};
pub use validation::{validate, ValidationReport};
