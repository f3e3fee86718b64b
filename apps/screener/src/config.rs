use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_RESUME_PATH: &str = "resume/SoftwareEngineer.pdf";
const DEFAULT_JOB_KEY: &str = "junior_engineer";
const DEFAULT_JOBS_PATH: &str = "jobs.json";
const DEFAULT_EVALUATION_DIR: &str = "evaluation";

/// Screening run configuration loaded from environment variables.
/// Built once in `main` and handed to the pipeline; nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Not validated here. An empty key surfaces as an authentication error from the model API.
    pub gemini_api_key: String,
    pub resume_path: PathBuf,
    pub job_key: String,
    pub jobs_path: PathBuf,
    pub evaluation_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        allow_missing_env_file(dotenvy::dotenv())?;

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            resume_path: env_or("RESUME_PATH", DEFAULT_RESUME_PATH).into(),
            job_key: env_or("JOB_KEY", DEFAULT_JOB_KEY),
            jobs_path: env_or("JOBS_PATH", DEFAULT_JOBS_PATH).into(),
            evaluation_dir: env_or("EVALUATION_DIR", DEFAULT_EVALUATION_DIR).into(),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// A missing `.env` is fine. One that exists but cannot be read or parsed is an error.
fn allow_missing_env_file<T>(loaded: dotenvy::Result<T>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("failed to load the .env file"),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
