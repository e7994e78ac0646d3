use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model behind every analysis. `LlmClient` in production, a fake in tests.
    pub llm: Arc<dyn ChatCompletion>,
    pub config: Config,
}
