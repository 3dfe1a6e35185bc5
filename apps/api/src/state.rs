use std::sync::Arc;

use crate::religion::generator::ReligionGenerator;
use crate::religion::store::ReligionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: ReligionGenerator,
    /// In-memory records; lost on restart.
    pub store: Arc<ReligionStore>,
}
