//! Stateless extraction over an ordered line sequence.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::{ExtractionConfig, OcrConfig};
use crate::models::result::{ExtractionResult, FieldCandidate, StructuredFields, TextLine};
use crate::ocr::{self, OcrOutput};

use super::{FieldResolver, LineClassifier, Result};

/// Classifies every line, resolves the candidates and assembles the record.
///
/// `extract` never fails: any error or panic inside a run is reported as a
/// result with `success == false`.
pub struct ExtractionPipeline {
    classifier: LineClassifier,
    resolver: FieldResolver,
}

impl ExtractionPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::with_classifier(LineClassifier::new())
    }

    pub fn with_classifier(classifier: LineClassifier) -> Self {
        Self {
            classifier,
            resolver: FieldResolver::new(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_classifier(
            LineClassifier::new()
                .with_normalization(config.normalize_lines)
                .with_min_confidence(config.min_line_confidence),
        )
    }

    pub fn extract(&self, lines: &[TextLine]) -> ExtractionResult {
        let start = Instant::now();
        let raw_text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "Extracting registration fields from {} lines with {} detectors",
            lines.len(),
            self.classifier.detector_count()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(lines)));

        let result = match outcome {
            Ok(Ok((fields, warnings))) => {
                ExtractionResult::success(raw_text, fields, lines.len()).with_warnings(warnings)
            }
            Ok(Err(e)) => {
                warn!("Extraction failed: {}", e);
                ExtractionResult::failure(raw_text, e.to_string(), lines.len())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Extraction panicked: {}", message);
                ExtractionResult::failure(raw_text, message, lines.len())
            }
        };

        debug!(
            "Extracted {} fields in {:?}",
            result.fields.len(),
            start.elapsed()
        );

        result
    }

    /// Extract from newline-separated text.
    pub fn extract_text(&self, text: &str) -> ExtractionResult {
        self.extract(&TextLine::from_texts(text.lines()))
    }

    /// Extract from the lines an OCR backend returned.
    pub fn extract_output(&self, output: &OcrOutput) -> ExtractionResult {
        self.extract(&output.lines)
    }

    /// Recognize one input file and extract its fields. A file that cannot
    /// be recognized yields a failure record with empty `raw_text`.
    pub fn process_file(&self, path: &Path, config: &OcrConfig) -> ExtractionResult {
        match ocr::recognize(path, config) {
            Ok(output) => self.extract_output(&output),
            Err(e) => {
                warn!("OCR failed for {}: {}", path.display(), e);
                ExtractionResult::failure(String::new(), e.to_string(), 0)
            }
        }
    }

    fn run(&self, lines: &[TextLine]) -> Result<(StructuredFields, Vec<String>)> {
        let mut candidates: Vec<FieldCandidate> = Vec::new();
        let mut warnings = Vec::new();

        for line in lines {
            let classification = self.classifier.classify(line);
            candidates.extend(classification.candidates);
            warnings.extend(classification.errors.iter().map(|e| e.to_string()));
        }

        debug!("{} candidates from {} lines", candidates.len(), lines.len());

        let fields = self.resolver.resolve(&candidates)?;
        Ok((fields, warnings))
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("internal error: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("internal error: {}", s)
    } else {
        "internal error".to_string()
    }
}
