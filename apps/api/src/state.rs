use std::sync::Arc;

use crate::ats::AtsScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable ATS scorer. Default: FuzzyAtsScorer with Sørensen–Dice similarity.
    pub scorer: Arc<dyn AtsScorer>,
}
