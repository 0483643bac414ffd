use crate::config::Config;
use crate::jobs::store::JobStore;
use crate::triage::Triage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: JobStore,
    /// Holds the optional LLM classifier; falls back to keyword triage.
    pub triage: Triage,
    pub config: Config,
}
