use serde_json::Value;

/// Values carried through one screening run.
///
/// `output` is empty until the evaluator has run and holds the raw model text afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationState {
    pub resume: String,
    pub job_description: Value,
    pub output: Option<String>,
}

impl EvaluationState {
    pub fn new(resume: String, job_description: Value) -> Self {
        Self {
            resume,
            job_description,
            output: None,
        }
    }

    /// Same state with the raw model response attached.
    pub fn with_output(self, output: String) -> Self {
        Self {
            output: Some(output),
            ..self
        }
    }
}
