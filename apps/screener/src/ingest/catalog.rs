//! Job catalog: a JSON object mapping job identifiers to free-form job descriptions.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::error;

use crate::errors::ScreenerError;

/// Looks up `job_key` in the catalog at `jobs_path`. Logs and returns `None` on any failure.
pub fn load_job_description(job_key: &str, jobs_path: &Path) -> Option<Value> {
    try_load_job_description(job_key, jobs_path)
        .map_err(|e| error!("{e}"))
        .ok()
}

/// Returns the stored value untouched, whatever its type. Only an absent key is an error.
pub fn try_load_job_description(job_key: &str, jobs_path: &Path) -> Result<Value, ScreenerError> {
    if !jobs_path.exists() {
        return Err(ScreenerError::FileNotFound(jobs_path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(jobs_path).map_err(|source| ScreenerError::Io {
        path: jobs_path.to_path_buf(),
        source,
    })?;

    let all_jobs: Value =
        serde_json::from_str(&raw).map_err(|source| ScreenerError::MalformedCatalog {
            path: jobs_path.to_path_buf(),
            source,
        })?;

    let mut all_jobs: Map<String, Value> = match all_jobs {
        Value::Object(map) => map,
        _ => return Err(ScreenerError::CatalogNotAnObject(jobs_path.to_path_buf())),
    };

    all_jobs
        .remove(job_key)
        .ok_or_else(|| ScreenerError::JobNotFound(job_key.to_string()))
}
