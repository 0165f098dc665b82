//! Scoring API binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `scholar-config.yaml` (or `SCHOLAR_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the scholarship pipeline once
//! 4. Register the fuzzy predictor
//! 5. Serve until `Ctrl-C`

use std::sync::Arc;

use scholar_core::config::LoggingConfig;
use scholar_core::{FuzzyPredictor, ScholarConfig, ScholarshipPipeline};
use scholar_server::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the scoring API.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the rule tables fail to
/// compile, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = ScholarConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        host = config.server.host,
        port = config.server.port,
        method = config.engine.defuzzification.as_str(),
        parallel_axes = config.engine.parallel_axes,
        degenerate_fallback = ?config.engine.degenerate_fallback,
        "scholar-server starting"
    );

    // 3. Build the pipeline.
    let pipeline = Arc::new(ScholarshipPipeline::from_config(&config.engine)?);
    info!(
        eligibility_rules = pipeline.eligibility_rules().len(),
        scholarship_rules = pipeline.scholarship_rules().len(),
        "Scholarship pipeline ready"
    );

    // 4. Register predictors.
    let state = Arc::new(AppState::new().with_predictor(Arc::new(FuzzyPredictor::new(pipeline))));

    // 5. Serve.
    start_server(&ServerConfig::from(&config.server), state).await?;
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
