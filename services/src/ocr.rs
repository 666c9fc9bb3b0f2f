//! Optical character recognition for uploaded images.
//!
//! [`TesseractOcr`] spools the upload into a scoped temporary file and runs the
//! `tesseract` CLI on it (`tesseract <file> stdout -l <lang>`). The temporary
//! file is removed when the guard drops, on success and failure alike.

use std::{future::Future, path::PathBuf, process::Stdio, time::Instant};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info, instrument, warn};

/// Errors produced while extracting text from an image.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The upload carried no bytes.
    #[error("image is empty")]
    EmptyImage,

    /// Creating or writing the temporary input file failed.
    #[error("failed to stage image for OCR: {0}")]
    Io(#[from] std::io::Error),

    /// The OCR engine could not be started (binary missing, not executable, ...).
    #[error("failed to start OCR engine `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The OCR engine ran but reported a failure (unreadable image, bad language data, ...).
    #[error("OCR engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },
}

/// Given image bytes, produce the text found in the image.
pub trait TextExtractor: Send + Sync {
    /// Extracts plain text from `image`. `file_name` is the client-side name, if any,
    /// and only serves as a hint for the image format.
    fn extract_text(
        &self,
        image: &[u8],
        file_name: Option<&str>,
    ) -> impl Future<Output = Result<String, OcrError>> + Send;
}

/// Tesseract settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Executable name or path (default `tesseract`).
    pub binary: String,
    /// Language pack(s), e.g. `eng` or `eng+deu`.
    pub language: String,
    /// Optional `tessdata` directory passed as `--tessdata-dir`.
    pub data_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
            data_path: None,
        }
    }
}

impl OcrConfig {
    /// Reads `OCR_BINARY`, `OCR_LANGUAGE` and `OCR_DATA_PATH`, falling back to defaults.
    pub fn from_env() -> Self {
        let var = |k: &str| {
            std::env::var(k)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let dflt = Self::default();

        Self {
            binary: var("OCR_BINARY").unwrap_or(dflt.binary),
            language: var("OCR_LANGUAGE").unwrap_or(dflt.language),
            data_path: var("OCR_DATA_PATH").map(PathBuf::from),
        }
    }
}

/// [`TextExtractor`] backed by the Tesseract command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    cfg: OcrConfig,
}

impl TesseractOcr {
    pub fn new(cfg: OcrConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.cfg
    }

    fn command(&self, input: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.cfg.binary);
        cmd.arg(input).arg("stdout").arg("-l").arg(&self.cfg.language);
        if let Some(dir) = &self.cfg.data_path {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl TextExtractor for TesseractOcr {
    #[instrument(skip_all, fields(bytes = image.len(), lang = %self.cfg.language))]
    async fn extract_text(&self, image: &[u8], file_name: Option<&str>) -> Result<String, OcrError> {
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }

        // Deleted on drop; keep it alive until the engine has finished reading.
        let staged = tempfile::Builder::new()
            .prefix("ocr_input_")
            .suffix(&temp_suffix(file_name))
            .tempfile()?;
        tokio::fs::write(staged.path(), image).await?;
        debug!(path = %staged.path().display(), "image staged for OCR");

        let started = Instant::now();
        let output = self
            .command(staged.path())
            .output()
            .await
            .map_err(|source| OcrError::Spawn {
                binary: self.cfg.binary.clone(),
                source,
            })?;

        if let Err(e) = staged.close() {
            warn!(error = %e, "failed to delete temporary OCR input");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim().chars().take(240).collect::<String>();
            error!(status = %output.status, %stderr, "OCR engine failed");
            return Err(OcrError::Engine {
                status: output.status.to_string(),
                stderr,
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(
            chars = text.chars().count(),
            latency_ms = started.elapsed().as_millis(),
            "OCR completed"
        );
        debug!(%text, "extracted text");

        Ok(text)
    }
}

/// Builds `_<name>` from the client file name, keeping only characters that are
/// safe in a temp-file name. The extension is what matters to the engine.
fn temp_suffix(file_name: Option<&str>) -> String {
    let name = file_name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .unwrap_or_default();
    let safe: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .take(64)
        .collect();

    if safe.is_empty() {
        "_upload".to_string()
    } else {
        format!("_{safe}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_keeps_safe_file_name_parts() {
        assert_eq!(temp_suffix(Some("scan 1.png")), "_scan1.png");
        assert_eq!(temp_suffix(Some("../../etc/passwd")), "_passwd");
        assert_eq!(temp_suffix(Some(r"C:\photos\page.jpg")), "_page.jpg");
        assert_eq!(temp_suffix(None), "_upload");
        assert_eq!(temp_suffix(Some("///")), "_upload");
    }

    #[tokio::test]
    async fn empty_image_is_rejected_before_spawning() {
        let ocr = TesseractOcr::new(OcrConfig {
            binary: "definitely-not-a-real-ocr-binary".into(),
            ..OcrConfig::default()
        });
        let err = ocr.extract_text(&[], Some("a.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::EmptyImage));
    }

    #[tokio::test]
    async fn missing_engine_is_a_spawn_error_and_leaves_no_temp_file() {
        let ocr = TesseractOcr::new(OcrConfig {
            binary: "definitely-not-a-real-ocr-binary".into(),
            ..OcrConfig::default()
        });

        let marker = format!("_probe-{}.png", crate::uuid::fresh_id());
        let err = ocr
            .extract_text(b"\x89PNG not really", Some(&marker))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));

        let leftovers = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(&marker))
            .count();
        assert_eq!(leftovers, 0);
    }
}
