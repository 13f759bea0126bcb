use std::sync::Arc;

use crate::config::Config;
use crate::mentor::MentorService;
use crate::roadmap::RoadmapService;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Roadmap retrieval boundary. Gemini in production, fakes in tests.
    pub roadmap_service: Arc<dyn RoadmapService>,
    pub mentor_service: Arc<dyn MentorService>,
    pub config: Config,
}
