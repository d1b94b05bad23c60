mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::entities::{EntityTagger, LlmEntityTagger, NoopEntityTagger};
use crate::screening::pipeline::ScreeningEngine;
use crate::state::AppState;
use crate::storage::{LocalResumeStore, ResumeStore, S3ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartHire screening API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize resume storage
    let resumes = build_resume_store(&config).await;
    info!("Resume storage initialized ({})", resumes.backend());

    // Initialize entity tagger (NoopEntityTagger by default; swap via ENABLE_LLM_ENTITY_TAGGING)
    let entity_tagger = build_entity_tagger(&config)?;
    info!("Entity tagger: {}", entity_tagger.name());

    let engine = Arc::new(
        ScreeningEngine::new(config.vocabulary.clone())
            .with_timeouts(config.extraction_timeout, config.analysis_timeout),
    );
    info!(
        "Screening engine ready: {} vocabulary terms",
        engine.vocabulary().skills_count()
    );

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        resumes,
        entity_tagger,
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS once the dashboard origin is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_resume_store(config: &Config) -> Arc<dyn ResumeStore> {
    match &config.storage {
        StorageBackend::Local {
            upload_dir,
            screening_dir,
        } => Arc::new(LocalResumeStore::new(upload_dir.clone(), screening_dir.clone())),
        StorageBackend::S3 {
            bucket,
            endpoint,
            prefix,
            access_key_id,
            secret_access_key,
        } => {
            let client =
                S3ResumeStore::build_client(endpoint, access_key_id, secret_access_key).await;
            Arc::new(S3ResumeStore::new(client, bucket.clone(), prefix.clone()))
        }
    }
}

fn build_entity_tagger(config: &Config) -> Result<Arc<dyn EntityTagger>> {
    if !config.enable_llm_entity_tagging {
        return Ok(Arc::new(NoopEntityTagger));
    }
    match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmEntityTagger(client)))
        }
        None => {
            warn!("ENABLE_LLM_ENTITY_TAGGING is set but ANTHROPIC_API_KEY is missing; entity tagging disabled");
            Ok(Arc::new(NoopEntityTagger))
        }
    }
}
