use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name stored in place of a missing `candidate_name` when deduplicating.
pub const UNKNOWN_CANDIDATE: &str = "Unknown";

const EXPECTED_FIELDS: &[&str] = &[
    "candidate_name",
    "compatibility_score",
    "summary",
    "strengths",
    "missing_critical_skills",
    "experience_level_assessment",
    "recommendation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Interview,
    Hold,
    Reject,
}

/// One structured evaluation produced by the model.
///
/// The record is kept exactly as the model produced it. Accessors give typed views over the
/// expected fields; anything that does not fit the expected shape is reported by
/// `conformance_issues` but never dropped or rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord(Map<String, Value>);

/// A field that does not match the expected record shape. Advisory only.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceIssue {
    pub field: &'static str,
    pub description: String,
}

impl CandidateRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The value records are deduplicated on: `candidate_name` as stored, or the
    /// `"Unknown"` sentinel when the field is absent.
    pub fn dedup_key(&self) -> Value {
        self.0
            .get("candidate_name")
            .cloned()
            .unwrap_or_else(|| Value::String(UNKNOWN_CANDIDATE.to_string()))
    }

    /// Human-readable name for log lines.
    pub fn display_name(&self) -> String {
        match self.dedup_key() {
            Value::String(name) => name,
            other => other.to_string(),
        }
    }

    pub fn compatibility_score(&self) -> Option<i64> {
        self.0.get("compatibility_score").and_then(Value::as_i64)
    }

    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }

    pub fn strengths(&self) -> Vec<&str> {
        self.string_list("strengths")
    }

    pub fn missing_critical_skills(&self) -> Vec<&str> {
        self.string_list("missing_critical_skills")
    }

    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.label("experience_level_assessment")
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.label("recommendation")
    }

    /// Compares the record against the expected shape and lists every deviation.
    pub fn conformance_issues(&self) -> Vec<ConformanceIssue> {
        let mut issues = Vec::new();

        for &field in EXPECTED_FIELDS {
            if !self.0.contains_key(field) {
                issues.push(ConformanceIssue {
                    field,
                    description: "missing".to_string(),
                });
            }
        }

        if let Some(value) = self.0.get("candidate_name") {
            if !value.is_string() {
                issues.push(issue("candidate_name", "expected a string", value));
            }
        }

        if let Some(value) = self.0.get("compatibility_score") {
            match value.as_i64() {
                Some(score) if (0..=100).contains(&score) => {}
                Some(_) => issues.push(issue("compatibility_score", "outside 0-100", value)),
                None => issues.push(issue("compatibility_score", "expected an integer", value)),
            }
        }

        if let Some(value) = self.0.get("summary") {
            if !value.is_string() {
                issues.push(issue("summary", "expected a string", value));
            }
        }

        for field in ["strengths", "missing_critical_skills"] {
            if let Some(value) = self.0.get(field) {
                let is_string_list = value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                if !is_string_list {
                    issues.push(issue(field, "expected a list of strings", value));
                }
            }
        }

        if let Some(value) = self.0.get("experience_level_assessment") {
            if self.experience_level().is_none() {
                issues.push(issue(
                    "experience_level_assessment",
                    "expected Junior, Mid, Senior or Mismatch",
                    value,
                ));
            }
        }

        if let Some(value) = self.0.get("recommendation") {
            if self.recommendation().is_none() {
                issues.push(issue(
                    "recommendation",
                    "expected Interview, Hold or Reject",
                    value,
                ));
            }
        }

        issues
    }

    fn string_list(&self, field: &str) -> Vec<&str> {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn label<T: serde::de::DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.0
            .get(field)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

fn issue(field: &'static str, problem: &str, value: &Value) -> ConformanceIssue {
    ConformanceIssue {
        field,
        description: format!("{problem}, got {value}"),
    }
}
