//! Settlement text extraction: validated PDF path → flattened text.
//!
//! ## Why spawn_blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which keeps thread-local
//! state and blocks while it parses. [`extract_text`] moves the work onto
//! tokio's blocking pool so an async caller never stalls a worker thread.
//!
//! Page texts are concatenated in page order with nothing in between; the
//! settlement markers rely on words that straddle line breaks being glued.

use crate::error::SettlementError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Source of a settlement's raw text.
///
/// The default is [`PdfiumExtractor`]; tests and callers with their own PDF
/// stack plug in a different implementation through
/// [`crate::config::ReportConfigBuilder::extractor`].
pub trait TextExtractor: Send + Sync {
    /// Return the full text of the document at `path`, pages in order.
    fn extract_text(&self, path: &Path, password: Option<&str>) -> Result<String, SettlementError>;
}

/// Extracts text with pdfium.
///
/// Binds to the library in `PDFIUM_LIB_PATH` when that is set, otherwise to
/// the system library.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfiumExtractor;

impl PdfiumExtractor {
    fn bind() -> Result<Pdfium, SettlementError> {
        let bindings = match std::env::var("PDFIUM_LIB_PATH") {
            Ok(dir) if !dir.is_empty() => Pdfium::bind_to_library(
                Pdfium::pdfium_platform_library_name_at_path(&dir),
            ),
            _ => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| SettlementError::PdfiumBindingFailed(format!("{:?}", e)))?;
        Ok(Pdfium::new(bindings))
    }
}

impl TextExtractor for PdfiumExtractor {
    fn extract_text(&self, path: &Path, password: Option<&str>) -> Result<String, SettlementError> {
        let pdfium = Self::bind()?;

        let document = pdfium.load_pdf_from_file(path, password).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    SettlementError::WrongPassword {
                        path: path.to_path_buf(),
                    }
                } else {
                    SettlementError::PasswordRequired {
                        path: path.to_path_buf(),
                    }
                }
            } else {
                SettlementError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let mut all_text = String::new();
        for (idx, page) in pages.iter().enumerate() {
            let text = page
                .text()
                .map_err(|e| SettlementError::TextExtractionFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?
                .all();
            debug!("Page {} → {} chars", idx + 1, text.len());
            all_text.push_str(&text);
        }

        Ok(all_text)
    }
}

/// Validate a local settlement path: it must exist, be readable, and start
/// with the `%PDF` magic bytes.
pub fn resolve_local(path: &Path) -> Result<PathBuf, SettlementError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(SettlementError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SettlementError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SettlementError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(SettlementError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

/// Run `extractor` on a blocking thread.
pub async fn extract_text(
    extractor: Arc<dyn TextExtractor>,
    path: &Path,
    password: Option<&str>,
) -> Result<String, SettlementError> {
    let path = path.to_path_buf();
    let pwd = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || extractor.extract_text(&path, pwd.as_deref()))
        .await
        .map_err(|e| SettlementError::Internal(format!("Extraction task panicked: {}", e)))?
}
