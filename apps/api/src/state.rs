use std::sync::Arc;

use crate::config::Config;
use crate::store::{ResumeLibrary, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store: Postgres when `DATABASE_URL` is set, memory otherwise.
    pub store: Arc<dyn ResumeStore>,
    /// Record lifecycle rules over `store`.
    pub library: ResumeLibrary,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ResumeStore>, config: Config) -> Self {
        let library = ResumeLibrary::new(store.clone(), config.default_resume_name.clone());
        AppState {
            store,
            library,
            config,
        }
    }
}
