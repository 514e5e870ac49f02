//! OCR through an external program.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::{parse_lines, OcrBackend, OcrBackendKind, OcrOutput};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Runs `<command> <args...> <image>` and reads recognized lines from stdout.
pub struct CommandBackend {
    command: String,
    args: Vec<String>,
    languages: Vec<String>,
}

impl CommandBackend {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            languages: Vec::new(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            languages: config.languages.clone(),
        }
    }

    fn run(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(image_path)
            .env("VREG_OCR_LANGS", self.languages.join(","))
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::Failed(format!(
                        "{} exited with {}: {}",
                        self.command,
                        output.status,
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                OcrError::BackendNotAvailable(format!("{} not found", self.command)),
            ),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl OcrBackend for CommandBackend {
    fn kind(&self) -> OcrBackendKind {
        OcrBackendKind::Command
    }

    fn is_available(&self) -> bool {
        let path = Path::new(&self.command);
        if path.components().count() > 1 {
            return path.is_file();
        }
        Command::new("which")
            .arg(&self.command)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            format!("{} is available", self.command)
        } else {
            format!(
                "{} not found. Set ocr.command to a program that prints recognized lines for an image.",
                self.command
            )
        }
    }

    fn recognize(&self, path: &Path) -> Result<OcrOutput, OcrError> {
        let start = Instant::now();

        // Rejects unreadable images before spawning anything
        let (width, height) =
            image::image_dimensions(path).map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        debug!("Image {} is {}x{}", path.display(), width, height);

        let stdout = self.run(path)?;
        let lines = parse_lines(&stdout)?;

        debug!("{} returned {} lines", self.command, lines.len());

        Ok(OcrOutput {
            lines,
            image_size: Some((width, height)),
            backend: OcrBackendKind::Command,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
