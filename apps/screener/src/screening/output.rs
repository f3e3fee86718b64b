//! Output parser: turns raw model text into a `CandidateRecord`.

use serde_json::Value;
use tracing::{error, warn};

use crate::errors::ScreenerError;
use crate::models::candidate::CandidateRecord;

/// Removes every ```json and ``` marker, wherever it appears, then trims.
pub fn strip_json_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses model output, logging and returning `None` when it is not a JSON object.
pub fn clean_and_parse(raw: &str) -> Option<CandidateRecord> {
    match try_parse_candidate(raw) {
        Ok(record) => {
            for issue in record.conformance_issues() {
                warn!(
                    "Candidate record field '{}' does not match the expected shape: {}",
                    issue.field, issue.description
                );
            }
            Some(record)
        }
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

pub fn try_parse_candidate(raw: &str) -> Result<CandidateRecord, ScreenerError> {
    let cleaned = strip_json_fences(raw);
    match serde_json::from_str::<Value>(&cleaned)? {
        Value::Object(fields) => Ok(CandidateRecord::new(fields)),
        _ => Err(ScreenerError::OutputNotAnObject),
    }
}
