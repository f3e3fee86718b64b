//! Resume loader: flat text extraction from a PDF, pages concatenated in document order.

use std::panic;
use std::path::Path;

use tracing::{error, info};

use crate::errors::ScreenerError;

/// Reads the resume at `path`. Logs and returns `None` on any failure.
pub fn read_resume(path: &Path) -> Option<String> {
    match try_read_resume(path) {
        Ok(text) => {
            info!("Resume loaded successfully from '{}'", path.display());
            Some(text)
        }
        Err(e @ ScreenerError::FileNotFound(_)) => {
            error!("{e}");
            error!("Please check the file name and directory.");
            None
        }
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

pub fn try_read_resume(path: &Path) -> Result<String, ScreenerError> {
    if !path.exists() {
        return Err(ScreenerError::FileNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| ScreenerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    extract_text(&bytes)
}

fn extract_text(bytes: &[u8]) -> Result<String, ScreenerError> {
    // pdf-extract panics on some malformed documents instead of returning an error.
    panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ScreenerError::PdfExtraction("the PDF extractor aborted".to_string()))?
        .map_err(|e| ScreenerError::PdfExtraction(e.to_string()))
}
