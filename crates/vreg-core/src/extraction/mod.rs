//! Registration field extraction: line classification, conflict resolution
//! and the pipeline that ties them together.

mod classifier;
pub mod normalize;
pub mod patterns;
mod pipeline;
mod resolver;
pub mod rules;

pub use classifier::{LineClassification, LineClassifier};
pub use pipeline::ExtractionPipeline;
pub use resolver::FieldResolver;
pub use rules::FieldDetector;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
