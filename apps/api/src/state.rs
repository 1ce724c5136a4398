use std::sync::Arc;

use crate::catalog::QuestionCatalog;
use crate::config::Config;
use crate::recommendation::scorer::SimilarityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once in `main`; never mutated.
    pub catalog: Arc<QuestionCatalog>,
    /// Pluggable similarity backend. Default: TfIdfScorer.
    pub scorer: Arc<dyn SimilarityScorer>,
}
