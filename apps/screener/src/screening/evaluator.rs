//! Evaluator: formats the screening prompt and makes the single model call per candidate.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LlmError, ReasoningModel};
use crate::models::evaluation::EvaluationState;
use crate::screening::prompts::SCREENING_PROMPT_TEMPLATE;

/// Holds the model backend and the prompt template for one pipeline run.
pub struct Screener {
    model: Arc<dyn ReasoningModel>,
    template: &'static str,
}

impl Screener {
    pub fn new(model: Arc<dyn ReasoningModel>) -> Self {
        Self {
            model,
            template: SCREENING_PROMPT_TEMPLATE,
        }
    }

    pub fn render_prompt(&self, state: &EvaluationState) -> String {
        let job_description = job_description_text(&state.job_description);
        fill_template(
            self.template,
            &[
                ("job_description", job_description.as_str()),
                ("resume", state.resume.as_str()),
            ],
        )
    }

    /// Sends the filled prompt and returns `state` with the raw response attached.
    /// Model errors are returned as-is for the caller to treat as fatal.
    pub async fn evaluate(&self, state: EvaluationState) -> Result<EvaluationState, LlmError> {
        let prompt = self.render_prompt(&state);
        info!(
            "Evaluating candidate with {} ({} prompt chars)",
            self.model.model_name(),
            prompt.len()
        );

        let output = self.model.invoke(&prompt).await?;
        Ok(state.with_output(output))
    }
}

/// Plain strings go in verbatim; any other JSON value is pretty-printed.
fn job_description_text(job_description: &Value) -> String {
    match job_description {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingModel {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReasoningModel for RecordingModel {
        async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|status| LlmError::Api {
                status,
                message: "denied".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    fn model(reply: Result<String, u16>) -> Arc<RecordingModel> {
        Arc::new(RecordingModel {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_prompt_contains_both_inputs() {
        let screener = Screener::new(model(Ok(String::new())));
        let state = EvaluationState::new(
            "Experienced Python developer".to_string(),
            json!({"skills": ["Python"]}),
        );
        let prompt = screener.render_prompt(&state);
        assert!(prompt.contains("Experienced Python developer"));
        assert!(prompt.contains("\"Python\""));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job_description}"));
        assert!(prompt.contains("\"candidate_name\""));
    }

    #[test]
    fn test_string_job_description_is_verbatim() {
        assert_eq!(job_description_text(&json!("Rust, 2 years")), "Rust, 2 years");
    }

    #[tokio::test]
    async fn test_evaluate_attaches_output() {
        let backend = model(Ok("{\"candidate_name\": \"Jane Doe\"}".to_string()));
        let screener = Screener::new(backend.clone());
        let state = EvaluationState::new("resume".to_string(), json!({"title": "Engineer"}));

        let evaluated = screener.evaluate(state.clone()).await.unwrap();

        assert_eq!(evaluated.resume, state.resume);
        assert_eq!(evaluated.job_description, state.job_description);
        assert_eq!(
            evaluated.output.as_deref(),
            Some("{\"candidate_name\": \"Jane Doe\"}")
        );
        assert_eq!(backend.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_propagates_model_error() {
        let backend = model(Err(401));
        let screener = Screener::new(backend.clone());
        let state = EvaluationState::new("resume".to_string(), json!({}));

        let result = screener.evaluate(state).await;

        assert!(matches!(result, Err(LlmError::Api { status: 401, .. })));
        assert_eq!(backend.prompts.lock().unwrap().len(), 1);
    }
}
