//! Pipeline input lines, field candidates and the final extraction record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fields::{FieldName, FieldValue};

/// Resolved fields keyed by name. Absent fields are simply not present.
pub type StructuredFields = BTreeMap<FieldName, FieldValue>;

/// One line of recognized text, in top-to-bottom document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text exactly as the OCR engine returned it.
    pub text: String,

    /// Position of the line in the input sequence.
    pub sequence_index: usize,

    /// Recognition confidence (0.0 - 1.0), if the engine reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Axis-aligned bounding box (x1, y1, x2, y2), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
}

impl TextLine {
    pub fn new(sequence_index: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sequence_index,
            confidence: None,
            bbox: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_bbox(mut self, bbox: [f32; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Build an indexed line sequence from plain texts.
    pub fn from_texts<I, S>(texts: I) -> Vec<TextLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| TextLine::new(i, t))
            .collect()
    }
}

/// A provisional value for one field, tied to the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub field: FieldName,
    pub value: FieldValue,
    pub source_line_index: usize,
    /// Guessed from the shape of the line rather than read after a label.
    /// Only considered when the field has no labelled candidate.
    pub inferred: bool,
}

impl FieldCandidate {
    pub fn new(field: FieldName, value: impl Into<FieldValue>, source_line_index: usize) -> Self {
        Self {
            field,
            value: value.into(),
            source_line_index,
            inferred: false,
        }
    }

    pub fn inferred(field: FieldName, value: impl Into<FieldValue>, source_line_index: usize) -> Self {
        Self {
            inferred: true,
            ..Self::new(field, value, source_line_index)
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// False only when the run itself failed.
    pub success: bool,

    /// Input line texts joined with `\n`, in input order.
    pub raw_text: String,

    /// Resolved fields.
    #[serde(rename = "structured_fields", default)]
    pub fields: StructuredFields,

    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Number of input lines.
    #[serde(skip)]
    pub line_count: usize,

    /// Detector errors that were skipped during the run.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Build a successful result.
    pub fn success(raw_text: String, fields: StructuredFields, line_count: usize) -> Self {
        Self {
            success: true,
            raw_text,
            fields,
            error: None,
            line_count,
            warnings: Vec::new(),
        }
    }

    /// Build a failed result with no fields.
    pub fn failure(raw_text: String, error: impl Into<String>, line_count: usize) -> Self {
        Self {
            success: false,
            raw_text,
            fields: StructuredFields::new(),
            error: Some(error.into()),
            line_count,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Serialize as one compact JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
