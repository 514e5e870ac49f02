//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VregError};
use crate::ocr::OcrBackendKind;

/// Main configuration for vreg.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VregConfig {
    /// OCR collaborator configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// External OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Which backend turns images into text lines.
    pub backend: OcrBackendKind,

    /// Program to run for the command backend. The image path is appended
    /// after `args`.
    pub command: String,

    /// Extra arguments passed before the image path.
    pub args: Vec<String>,

    /// Recognition languages, exported to the program as `VREG_OCR_LANGS`.
    pub languages: Vec<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackendKind::Command,
            command: "surya_ocr_lines".to_string(),
            args: Vec::new(),
            languages: vec!["ko".to_string(), "en".to_string()],
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines with a reported confidence below this are not classified.
    pub min_line_confidence: f32,

    /// Trim, drop zero-width characters and collapse whitespace before
    /// classification.
    pub normalize_lines: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_line_confidence: 0.0,
            normalize_lines: true,
        }
    }
}

impl VregConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let confidence = self.extraction.min_line_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(VregError::Config(format!(
                "extraction.min_line_confidence must be between 0 and 1, got {}",
                confidence
            )));
        }

        if self.ocr.backend == OcrBackendKind::Command && self.ocr.command.trim().is_empty() {
            return Err(VregError::Config(
                "ocr.command must be set for the command backend".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: VregConfig =
            serde_json::from_str(r#"{"extraction":{"min_line_confidence":0.4}}"#).unwrap();
        assert_eq!(config.extraction.min_line_confidence, 0.4);
        assert!(config.extraction.normalize_lines);
        assert_eq!(config.ocr.backend, OcrBackendKind::Command);
        assert_eq!(config.ocr.languages, vec!["ko", "en"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VregConfig::default();
        config.ocr.command = "my-ocr".to_string();
        config.save(&path).unwrap();

        let loaded = VregConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.command, "my-ocr");
    }

    #[test]
    fn test_invalid_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = VregConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, VregError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = VregConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, VregError::Io(_)));
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction":{"min_line_confidence":1.5}}"#).unwrap();

        let err = VregConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, VregError::Config(_)));
        assert!(err.to_string().contains("min_line_confidence"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let mut config = VregConfig::default();
        config.ocr.command = "  ".to_string();
        assert!(matches!(config.validate(), Err(VregError::Config(_))));

        config.ocr.backend = OcrBackendKind::Transcript;
        assert!(config.validate().is_ok());
    }
}
