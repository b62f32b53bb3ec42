use std::sync::Arc;

use crate::analysis::AtsScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the process-wide ModelHandle; cloned cheaply per request.
    pub scorer: Arc<AtsScorer>,
}
