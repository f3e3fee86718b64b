use std::path::PathBuf;

use thiserror::Error;

/// Soft-fail conditions of the screening pipeline.
///
/// None of these stop the process. Each stage logs the error and hands its caller an
/// absent result; only `LlmError` from the model call is fatal.
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("file '{}' was not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read the PDF: {0}")]
    PdfExtraction(String),

    #[error("failed to decode JSON in '{}': {source}", path.display())]
    MalformedCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog '{}' is not a JSON object", .0.display())]
    CatalogNotAnObject(PathBuf),

    #[error("job key '{0}' not found in the catalog")]
    JobNotFound(String),

    #[error("failed to parse model output as JSON: {0}")]
    OutputParse(#[from] serde_json::Error),

    #[error("model output is JSON but not an object")]
    OutputNotAnObject,

    #[error("could not write store '{}': {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
