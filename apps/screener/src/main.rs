mod config;
mod errors;
mod ingest;
mod llm_client;
mod models;
mod pipeline;
mod screening;
mod store;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::pipeline::{Pipeline, PipelineOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Diagnostics go to stdout through the fmt layer
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting candidate screener v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; the model call will be rejected by the API");
    }

    let llm = GeminiClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let pipeline = Pipeline::new(&config, Arc::new(llm));

    // Model errors propagate here and end the process with a failure status.
    let outcome = pipeline.run(&config.resume_path, &config.job_key).await?;

    match outcome {
        PipelineOutcome::Saved { candidate, path } => {
            info!("Screening complete: '{candidate}' stored in {}", path.display())
        }
        PipelineOutcome::Skipped { candidate } => {
            info!("Screening complete: '{candidate}' was already stored")
        }
        PipelineOutcome::Aborted(stage) => warn!("Screening stopped at {stage:?}"),
        PipelineOutcome::WriteFailed => warn!("Screening finished but the result was not saved"),
    }

    Ok(())
}
