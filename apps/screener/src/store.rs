//! Candidate store: one pretty-printed JSON array per job identifier, append-only,
//! unique on `candidate_name`.
//!
//! Known limitation: there is no locking. Two processes appending to the same job's file
//! at the same time can each read the old array and the later rename wins, losing the
//! other append. The atomic rename only guarantees the file is never half-written.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::ScreenerError;
use crate::models::candidate::CandidateRecord;

/// What was found on disk before an append.
#[derive(Debug)]
pub enum StoreState {
    Missing,
    Empty,
    /// A JSON array. Elements are kept as stored, including any that are not objects.
    Entries(Vec<Value>),
    /// Not a JSON array. Treated as an empty store, so the next append replaces the file.
    Corrupt(serde_json::Error),
}

impl StoreState {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            StoreState::Entries(entries) => entries,
            StoreState::Missing | StoreState::Empty | StoreState::Corrupt(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    Saved { path: PathBuf, total: usize },
    /// A record with the same name is already stored; nothing was written.
    Skipped { name: String },
}

/// Directory of per-job store files.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    dir: PathBuf,
}

impl CandidateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, job_key: &str) -> PathBuf {
        self.dir.join(format!("{job_key}.json"))
    }

    pub fn load(&self, job_key: &str) -> Result<StoreState, ScreenerError> {
        load_file(&self.path_for(job_key))
    }

    /// Appends `record` unless a stored record has the same name.
    ///
    /// A corrupt store is logged and then overwritten. Write failures are returned for the
    /// caller to report; they never panic.
    pub fn append(
        &self,
        job_key: &str,
        record: &CandidateRecord,
    ) -> Result<AppendOutcome, ScreenerError> {
        let path = self.path_for(job_key);
        info!("Candidate store: {}", path.display());

        let state = self.load(job_key)?;
        if let StoreState::Corrupt(e) = &state {
            warn!(
                "Store '{}' is not a valid JSON array ({e}); starting from an empty store",
                path.display()
            );
        }
        let mut entries = state.into_entries();

        let key = record.dedup_key();
        let name = record.display_name();
        if entries.iter().any(|existing| has_name(existing, &key)) {
            info!(
                "Skipping: candidate '{name}' already exists in {}",
                path.display()
            );
            return Ok(AppendOutcome::Skipped { name });
        }

        entries.push(Value::Object(record.fields().clone()));
        write_file(&self.dir, &path, &entries)?;

        info!("Saved '{name}' to '{}'", path.display());
        Ok(AppendOutcome::Saved {
            path,
            total: entries.len(),
        })
    }
}

/// Exact, case-sensitive match on `candidate_name`. Entries without a name, and entries
/// that are not objects, never match.
fn has_name(entry: &Value, key: &Value) -> bool {
    entry.get("candidate_name") == Some(key)
}

fn load_file(path: &Path) -> Result<StoreState, ScreenerError> {
    if !path.exists() {
        return Ok(StoreState::Missing);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ScreenerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.is_empty() {
        return Ok(StoreState::Empty);
    }

    Ok(match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(entries) => StoreState::Entries(entries),
        Err(e) => StoreState::Corrupt(e),
    })
}

/// Writes the whole array with 4-space indentation. Non-ASCII text is written as-is.
fn write_file(dir: &Path, path: &Path, entries: &[Value]) -> Result<(), ScreenerError> {
    let write_err = |source: std::io::Error| ScreenerError::StoreWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(|e| write_err(e.into()))?;

    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&buf).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
