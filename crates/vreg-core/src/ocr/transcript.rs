//! Lines recognized ahead of time, read from a `.txt` or `.json` file.

use std::path::Path;
use std::time::Instant;

use super::{parse_lines, OcrBackend, OcrBackendKind, OcrOutput};
use crate::error::OcrError;

#[derive(Debug, Default)]
pub struct TranscriptBackend;

impl TranscriptBackend {
    pub fn new() -> Self {
        Self
    }
}

impl OcrBackend for TranscriptBackend {
    fn kind(&self) -> OcrBackendKind {
        OcrBackendKind::Transcript
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "Transcript input is always available".to_string()
    }

    fn recognize(&self, path: &Path) -> Result<OcrOutput, OcrError> {
        let start = Instant::now();
        let content = std::fs::read_to_string(path)?;

        Ok(OcrOutput {
            lines: parse_lines(&content)?,
            image_size: None,
            backend: OcrBackendKind::Transcript,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        std::fs::write(&path, "차명: 쏘나타\n12가3456\n").unwrap();

        let output = TranscriptBackend::new().recognize(&path).unwrap();
        assert_eq!(output.lines.len(), 2);
        assert_eq!(output.image_size, None);
        assert_eq!(output.backend, OcrBackendKind::Transcript);
    }

    #[test]
    fn test_missing_transcript() {
        let err = TranscriptBackend::new()
            .recognize(Path::new("/nonexistent/lines.txt"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Io(_)));
    }
}
