//! Screening pipeline: resume → job description → evaluation → parse → persist, once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::config::Config;
use crate::ingest::catalog::load_job_description;
use crate::ingest::resume::read_resume;
use crate::llm_client::{LlmError, ReasoningModel};
use crate::models::evaluation::EvaluationState;
use crate::screening::evaluator::Screener;
use crate::screening::output::clean_and_parse;
use crate::store::{AppendOutcome, CandidateStore};

/// The soft-fail stage that stopped a run early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resume,
    JobDescription,
    ModelOutput,
}

/// How a run ended. Every variant is a normal exit; only model errors are fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Saved { candidate: String, path: PathBuf },
    Skipped { candidate: String },
    Aborted(Stage),
    WriteFailed,
}

pub struct Pipeline {
    screener: Screener,
    store: CandidateStore,
    jobs_path: PathBuf,
}

impl Pipeline {
    pub fn new(config: &Config, model: Arc<dyn ReasoningModel>) -> Self {
        Self {
            screener: Screener::new(model),
            store: CandidateStore::new(&config.evaluation_dir),
            jobs_path: config.jobs_path.clone(),
        }
    }

    /// Screens the resume PDF at `resume_path` against `job_key`.
    pub async fn run(
        &self,
        resume_path: &Path,
        job_key: &str,
    ) -> Result<PipelineOutcome, LlmError> {
        let resume = read_resume(resume_path);
        let job_description = load_job_description(job_key, &self.jobs_path);

        let Some(resume) = resume else {
            return Ok(PipelineOutcome::Aborted(Stage::Resume));
        };
        let Some(job_description) = job_description else {
            return Ok(PipelineOutcome::Aborted(Stage::JobDescription));
        };

        self.screen(resume, job_description, job_key).await
    }

    /// Runs evaluation, parsing and persistence for already-loaded inputs.
    pub async fn screen(
        &self,
        resume: String,
        job_description: Value,
        job_key: &str,
    ) -> Result<PipelineOutcome, LlmError> {
        let state = EvaluationState::new(resume, job_description);
        let evaluated = self.screener.evaluate(state).await?;
        let raw = evaluated.output.unwrap_or_default();

        let Some(record) = clean_and_parse(&raw) else {
            return Ok(PipelineOutcome::Aborted(Stage::ModelOutput));
        };

        info!(
            "Evaluated '{}': score={:?} level={:?} recommendation={:?}",
            record.display_name(),
            record.compatibility_score(),
            record.experience_level(),
            record.recommendation()
        );
        if let Some(summary) = record.summary() {
            info!("Summary: {summary}");
        }
        info!(
            "Strengths: [{}]; missing critical skills: [{}]",
            record.strengths().join(", "),
            record.missing_critical_skills().join(", ")
        );

        match self.store.append(job_key, &record) {
            Ok(AppendOutcome::Saved { path, total }) => {
                info!("Store for '{job_key}' now holds {total} candidate(s)");
                Ok(PipelineOutcome::Saved {
                    candidate: record.display_name(),
                    path,
                })
            }
            Ok(AppendOutcome::Skipped { name }) => {
                Ok(PipelineOutcome::Skipped { candidate: name })
            }
            Err(e) => {
                error!("Error saving file: {e}");
                Ok(PipelineOutcome::WriteFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const JANE_REPLY: &str = "```json\n{\"candidate_name\":\"Jane Doe\",\"compatibility_score\":80,\"summary\":\"Python developer.\",\"strengths\":[\"Python\"],\"missing_critical_skills\":[],\"experience_level_assessment\":\"Junior\",\"recommendation\":\"Interview\"}\n```";

    struct CannedModel {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReasoningModel for CannedModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ReasoningModel for FailingModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 403,
                message: "API key not valid".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn setup(model: Arc<dyn ReasoningModel>) -> (TempDir, Config, Pipeline) {
        let dir = tempfile::tempdir().unwrap();
        let jobs_path = dir.path().join("jobs.json");
        std::fs::write(&jobs_path, r#"{"junior_engineer": {"skills": ["Python"]}}"#).unwrap();
        let config = Config {
            gemini_api_key: String::new(),
            resume_path: dir.path().join("resume/SoftwareEngineer.pdf"),
            job_key: "junior_engineer".to_string(),
            jobs_path,
            evaluation_dir: dir.path().join("evaluation"),
            rust_log: "info".to_string(),
        };
        let pipeline = Pipeline::new(&config, model);
        (dir, config, pipeline)
    }

    fn canned(reply: &'static str) -> Arc<CannedModel> {
        Arc::new(CannedModel {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_scenario_saves_once() {
        let model = canned(JANE_REPLY);
        let (_dir, config, pipeline) = setup(model.clone());
        let job = load_job_description("junior_engineer", &config.jobs_path).unwrap();

        let first = pipeline
            .screen("Experienced Python developer".to_string(), job.clone(), "junior_engineer")
            .await
            .unwrap();
        let second = pipeline
            .screen("Experienced Python developer".to_string(), job, "junior_engineer")
            .await
            .unwrap();

        assert!(matches!(first, PipelineOutcome::Saved { ref candidate, .. } if candidate == "Jane Doe"));
        assert_eq!(
            second,
            PipelineOutcome::Skipped {
                candidate: "Jane Doe".to_string()
            }
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);

        let stored: Value = serde_json::from_str(
            &std::fs::read_to_string(config.evaluation_dir.join("junior_engineer.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
        assert_eq!(stored[0]["candidate_name"], "Jane Doe");
        assert_eq!(stored[0]["compatibility_score"], 80);
    }

    #[tokio::test]
    async fn test_missing_resume_aborts_before_model_call() {
        let model = canned(JANE_REPLY);
        let (_dir, config, pipeline) = setup(model.clone());

        let outcome = pipeline
            .run(&config.resume_path, &config.job_key)
            .await
            .unwrap();

        assert_eq!(outcome, PipelineOutcome::Aborted(Stage::Resume));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(!config.evaluation_dir.exists());
    }

    #[tokio::test]
    async fn test_unparseable_output_is_not_persisted() {
        let model = canned("I could not evaluate this candidate.");
        let (_dir, config, pipeline) = setup(model);

        let outcome = pipeline
            .screen("resume".to_string(), json!({"skills": []}), "junior_engineer")
            .await
            .unwrap();

        assert_eq!(outcome, PipelineOutcome::Aborted(Stage::ModelOutput));
        assert!(!config.evaluation_dir.join("junior_engineer.json").exists());
    }

    #[tokio::test]
    async fn test_model_error_is_fatal() {
        let (_dir, config, pipeline) = setup(Arc::new(FailingModel));

        let result = pipeline
            .screen("resume".to_string(), json!({}), &config.job_key)
            .await;

        assert!(matches!(result, Err(LlmError::Api { status: 403, .. })));
        assert!(!config.evaluation_dir.exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_not_fatal() {
        let (_dir, config, pipeline) = setup(canned(JANE_REPLY));
        std::fs::write(&config.evaluation_dir, "not a directory").unwrap();

        let outcome = pipeline
            .screen("resume".to_string(), json!({}), &config.job_key)
            .await
            .unwrap();

        assert_eq!(outcome, PipelineOutcome::WriteFailed);
    }
}
