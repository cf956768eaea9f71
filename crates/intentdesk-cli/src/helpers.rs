//! Shared helper functions used across CLI subcommands.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use intentdesk_agent::{FallbackRecognizer, KeywordRecognizer, LlmConfig, LlmRecognizer};

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Resolve the fallback recognizer from the environment.
///
/// With `INTENTDESK_API_KEY` set, rule misses go to the LLM classifier;
/// otherwise the offline keyword heuristic is used.
pub fn resolve_fallback() -> anyhow::Result<(Arc<dyn FallbackRecognizer>, &'static str)> {
    if let Some(config) = LlmConfig::from_env() {
        info!(model = %config.model, base_url = %config.base_url, "LLM fallback enabled");
        let recognizer = LlmRecognizer::new(config)?;
        Ok((Arc::new(recognizer), "llm"))
    } else {
        info!("no api key configured, using keyword fallback");
        Ok((Arc::new(KeywordRecognizer::new()), "keyword"))
    }
}
