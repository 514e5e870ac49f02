//! Boundary to the external OCR engine.
//!
//! Recognition itself happens outside this crate. A backend only turns an
//! input file into an ordered list of [`TextLine`]s:
//! - [`CommandBackend`] runs a configured OCR program on an image
//! - [`TranscriptBackend`] reads lines that were recognized earlier

mod command;
mod transcript;

pub use command::CommandBackend;
pub use transcript::TranscriptBackend;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::result::TextLine;

/// Available backend types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackendKind {
    /// External OCR program.
    #[default]
    Command,
    /// Pre-recognized `.txt` / `.json` lines.
    Transcript,
}

impl OcrBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrBackendKind::Command => "command",
            OcrBackendKind::Transcript => "transcript",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "command" | "cmd" => Some(OcrBackendKind::Command),
            "transcript" | "text" => Some(OcrBackendKind::Transcript),
            _ => None,
        }
    }
}

impl fmt::Display for OcrBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lines recognized from one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Lines in reading order.
    pub lines: Vec<TextLine>,

    /// Image dimensions (width, height), when the input was an image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<(u32, u32)>,

    /// Backend that produced the lines.
    pub backend: OcrBackendKind,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for OCR backends.
pub trait OcrBackend: Send + Sync {
    /// Get the backend type.
    fn kind(&self) -> OcrBackendKind;

    /// Check whether the backend can run (program installed, ...).
    fn is_available(&self) -> bool;

    /// What is needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Recognize the text lines of one input file.
    fn recognize(&self, path: &Path) -> Result<OcrOutput, OcrError>;
}

/// True for inputs that already hold recognized lines.
pub fn is_transcript_path(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("txt" | "json")
    )
}

/// Pick the backend for an input file: transcripts are read directly,
/// everything else goes to the configured backend.
pub fn backend_for(path: &Path, config: &OcrConfig) -> Box<dyn OcrBackend> {
    if is_transcript_path(path) {
        return Box::new(TranscriptBackend::new());
    }
    match config.backend {
        OcrBackendKind::Command => Box::new(CommandBackend::from_config(config)),
        OcrBackendKind::Transcript => Box::new(TranscriptBackend::new()),
    }
}

/// Recognize the lines of one input file with the backend it calls for.
pub fn recognize(path: &Path, config: &OcrConfig) -> crate::Result<OcrOutput> {
    let backend = backend_for(path, config);
    debug!("Using {} backend for {}", backend.kind(), path.display());

    let output = backend.recognize(path).inspect_err(|e| {
        if matches!(e, OcrError::BackendNotAvailable(_)) {
            warn!("{}", backend.availability_hint());
        }
    })?;

    debug!(
        "Recognized {} lines in {}ms",
        output.lines.len(),
        output.processing_time_ms
    );
    Ok(output)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOutput {
    Document { text_lines: Vec<RawLine> },
    Lines(Vec<RawLine>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLine {
    Plain(String),
    Detailed {
        text: String,
        #[serde(default)]
        confidence: Option<f32>,
        #[serde(default)]
        bbox: Option<Vec<f32>>,
    },
}

/// Parse engine output into lines.
///
/// JSON may be `{"text_lines": [...]}` or a bare array; each entry is a
/// string or `{"text", "confidence", "bbox"}`. A bbox is either
/// `[x1, y1, x2, y2]` or an 8-value quadrilateral. Anything else is read as
/// plain text, one line per line, blank lines dropped.
pub fn parse_lines(content: &str) -> Result<Vec<TextLine>, OcrError> {
    let trimmed = content.trim_start_matches('\u{FEFF}').trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let raw: RawOutput =
            serde_json::from_str(trimmed).map_err(|e| OcrError::InvalidOutput(e.to_string()))?;
        let raw_lines = match raw {
            RawOutput::Document { text_lines } => text_lines,
            RawOutput::Lines(lines) => lines,
        };

        return Ok(raw_lines
            .into_iter()
            .enumerate()
            .map(|(i, raw)| match raw {
                RawLine::Plain(text) => TextLine::new(i, text),
                RawLine::Detailed {
                    text,
                    confidence,
                    bbox,
                } => {
                    let mut line = TextLine::new(i, text);
                    if let Some(confidence) = confidence {
                        line = line.with_confidence(confidence);
                    }
                    if let Some(rect) = bbox.as_deref().and_then(to_rect) {
                        line = line.with_bbox(rect);
                    }
                    line
                }
            })
            .collect());
    }

    Ok(TextLine::from_texts(
        trimmed.lines().filter(|l| !l.trim().is_empty()),
    ))
}

/// Axis-aligned rectangle from a 4-value box or an 8-value quadrilateral.
fn to_rect(values: &[f32]) -> Option<[f32; 4]> {
    match values.len() {
        4 => Some([values[0], values[1], values[2], values[3]]),
        8 => {
            let xs = values.iter().step_by(2);
            let ys = values.iter().skip(1).step_by(2);
            let min_x = xs.clone().cloned().fold(f32::INFINITY, f32::min);
            let max_x = xs.cloned().fold(f32::NEG_INFINITY, f32::max);
            let min_y = ys.clone().cloned().fold(f32::INFINITY, f32::min);
            let max_y = ys.cloned().fold(f32::NEG_INFINITY, f32::max);
            Some([min_x, min_y, max_x, max_y])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_text() {
        let lines = parse_lines("차명: 쏘나타\n\n  \n12가3456\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], TextLine::new(1, "12가3456"));
    }

    #[test]
    fn test_parse_document_json() {
        let json = r#"{"text_lines":[
            {"text":"12가3456","confidence":0.98,"bbox":[10,20,110,40]},
            {"text":"차명: 쏘나타","bbox":[0,0,10,0,10,5,0,5]}
        ]}"#;
        let lines = parse_lines(json).unwrap();

        assert_eq!(lines[0].confidence, Some(0.98));
        assert_eq!(lines[0].bbox, Some([10.0, 20.0, 110.0, 40.0]));
        assert_eq!(lines[1].sequence_index, 1);
        assert_eq!(lines[1].bbox, Some([0.0, 0.0, 10.0, 5.0]));
    }

    #[test]
    fn test_parse_string_array() {
        let lines = parse_lines(r#"["a", "b"]"#).unwrap();
        assert_eq!(lines, TextLine::from_texts(["a", "b"]));
        assert!(parse_lines("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_broken_json() {
        let err = parse_lines(r#"{"text_lines": 3}"#).unwrap_err();
        assert!(matches!(err, OcrError::InvalidOutput(_)));
    }

    #[test]
    fn test_recognize_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.txt");
        std::fs::write(&path, "소유자: 홍길동\n연료 경유\n").unwrap();

        let output = recognize(&path, &OcrConfig::default()).unwrap();
        assert_eq!(output.backend, OcrBackendKind::Transcript);
        assert_eq!(output.lines.len(), 2);
    }

    #[test]
    fn test_recognize_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = recognize(&dir.path().join("gone.txt"), &OcrConfig::default()).unwrap_err();
        assert!(matches!(err, crate::VregError::Ocr(OcrError::Io(_))));
    }

    #[test]
    fn test_backend_selection() {
        let config = OcrConfig::default();
        assert_eq!(backend_for(Path::new("a.TXT"), &config).kind(), OcrBackendKind::Transcript);
        assert_eq!(backend_for(Path::new("a.json"), &config).kind(), OcrBackendKind::Transcript);
        assert_eq!(backend_for(Path::new("a.png"), &config).kind(), OcrBackendKind::Command);
        assert_eq!(OcrBackendKind::from_str("Transcript"), Some(OcrBackendKind::Transcript));
    }
}
