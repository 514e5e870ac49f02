//! Runs the detector battery over single lines.

use tracing::{debug, trace, warn};

use crate::error::ExtractionError;
use crate::models::result::{FieldCandidate, TextLine};

use super::normalize::cleanup_line;
use super::rules::{default_detectors, FieldDetector};

/// Candidates and skipped detector failures for one line.
#[derive(Debug, Default)]
pub struct LineClassification {
    pub candidates: Vec<FieldCandidate>,
    pub errors: Vec<ExtractionError>,
}

/// Applies every detector to a line independently. A failing detector is
/// recorded and skipped; the others still run.
pub struct LineClassifier {
    detectors: Vec<Box<dyn FieldDetector>>,
    /// Clean up the text before matching.
    normalize: bool,
    /// Lines with a lower reported confidence are not classified.
    min_confidence: f32,
}

impl LineClassifier {
    /// Create a classifier with the full detector battery.
    pub fn new() -> Self {
        Self::with_detectors(default_detectors())
    }

    /// Create a classifier with a custom detector set.
    pub fn with_detectors(detectors: Vec<Box<dyn FieldDetector>>) -> Self {
        Self {
            detectors,
            normalize: true,
            min_confidence: 0.0,
        }
    }

    /// Set line cleanup before matching.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set minimum line confidence.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    pub fn classify(&self, line: &TextLine) -> LineClassification {
        let mut result = LineClassification::default();

        if let Some(confidence) = line.confidence {
            if confidence < self.min_confidence {
                debug!(
                    "Skipping line {} (confidence {:.2} < {:.2})",
                    line.sequence_index, confidence, self.min_confidence
                );
                return result;
            }
        }

        let text = if self.normalize {
            cleanup_line(&line.text)
        } else {
            line.text.trim().to_string()
        };
        if text.is_empty() {
            return result;
        }

        for detector in &self.detectors {
            match detector.detect(&text, line.sequence_index) {
                Ok(candidates) => {
                    for candidate in &candidates {
                        trace!(
                            "line {}: {} = {}",
                            line.sequence_index, candidate.field, candidate.value
                        );
                    }
                    result.candidates.extend(candidates);
                }
                Err(e) => {
                    warn!("Detector {} skipped line {}: {}", detector.name(), line.sequence_index, e);
                    result.errors.push(ExtractionError::Detector {
                        detector: detector.name(),
                        line: line.sequence_index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        result
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::{MileageDetector, PlateDetector};
    use crate::models::fields::{FieldName, FieldValue};

    fn fields(classification: &LineClassification) -> Vec<FieldName> {
        classification.candidates.iter().map(|c| c.field).collect()
    }

    #[test]
    fn test_line_feeds_several_fields() {
        let classifier = LineClassifier::new();
        let line = TextLine::new(0, "12가3456 경유 1998cc");
        let result = classifier.classify(&line);

        assert_eq!(
            fields(&result),
            vec![FieldName::LicensePlate, FieldName::EngineDisplacement, FieldName::FuelType]
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_failing_detector_does_not_stop_others() {
        let classifier = LineClassifier::with_detectors(vec![
            Box::new(MileageDetector),
            Box::new(PlateDetector),
        ]);
        let line = TextLine::new(4, "12가3456 99999999999999999999999km");
        let result = classifier.classify(&line);

        assert_eq!(fields(&result), vec![FieldName::LicensePlate]);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0],
            ExtractionError::Detector { detector: "mileage_km", line: 4, .. }
        ));
    }

    #[test]
    fn test_low_confidence_line_skipped() {
        let classifier = LineClassifier::new().with_min_confidence(0.5);
        let line = TextLine::new(0, "12가3456").with_confidence(0.2);
        assert!(classifier.classify(&line).candidates.is_empty());

        let line = TextLine::new(0, "12가3456").with_confidence(0.9);
        assert_eq!(classifier.classify(&line).candidates.len(), 1);
    }

    #[test]
    fn test_zero_width_characters_removed() {
        let classifier = LineClassifier::new();
        let line = TextLine::new(0, "차명:\u{200B} 쏘나타 ");
        let result = classifier.classify(&line);
        assert_eq!(result.candidates[0].value, FieldValue::from("쏘나타"));
    }

    #[test]
    fn test_blank_line() {
        let classifier = LineClassifier::new();
        assert!(classifier.classify(&TextLine::new(0, "   ")).candidates.is_empty());
    }
}
