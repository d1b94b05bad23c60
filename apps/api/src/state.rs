use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::screening::entities::EntityTagger;
use crate::screening::pipeline::ScreeningEngine;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Resume file storage. Local folders by default, S3 via RESUME_STORAGE=s3.
    pub resumes: Arc<dyn ResumeStore>,
    /// Pluggable entity tagger. Default: NoopEntityTagger. Swap via ENABLE_LLM_ENTITY_TAGGING.
    pub entity_tagger: Arc<dyn EntityTagger>,
    pub engine: Arc<ScreeningEngine>,
}
