use std::sync::Arc;

use crate::config::Config;
use crate::quiz::bank::QuizBank;
use crate::quiz::persistence::AnswerStore;
use crate::roadmap::RoadmapGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub quiz_bank: Arc<QuizBank>,
    pub roadmaps: Arc<RoadmapGenerator>,
    /// `None` when no database is configured; submissions are then not stored.
    pub answer_store: Option<Arc<dyn AnswerStore>>,
}
