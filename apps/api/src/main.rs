mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod quiz;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::quiz::bank::QuizBank;
use crate::quiz::persistence::{AnswerStore, PgAnswerStore};
use crate::roadmap::RoadmapGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed numeric values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting careerpath API v{}", env!("CARGO_PKG_VERSION"));

    // Quiz bank (read-only after this point)
    let quiz_bank = Arc::new(QuizBank::load(&config.quiz_bank_dir));
    info!("Quiz bank loaded from {}", config.quiz_bank_dir.display());

    // Optional PostgreSQL answer store
    let answer_store = connect_answer_store(&config).await;

    // Optional text generator
    let llm = connect_text_generator(&config).await;
    let roadmaps = Arc::new(RoadmapGenerator::new(llm, config.llm_timeout));

    // Build app state
    let state = AppState {
        config: config.clone(),
        quiz_bank,
        roadmaps,
        answer_store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to Postgres when `DATABASE_URL` is set. A failed connection disables
/// persistence instead of stopping the service.
async fn connect_answer_store(config: &Config) -> Option<Arc<dyn AnswerStore>> {
    let Some(url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set; quiz answers will not be stored");
        return None;
    };

    match PgAnswerStore::connect(url).await {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!("PostgreSQL unavailable ({e}); quiz answers will not be stored");
            None
        }
    }
}

/// Builds the model client when `LLM_BASE_URL` is set and pings it once.
async fn connect_text_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
    let Some(base_url) = config.llm_base_url.as_deref() else {
        info!("LLM_BASE_URL not set; roadmaps and advice use the static catalog");
        return None;
    };

    let client = match LlmClient::new(base_url, &config.llm_model, config.llm_timeout) {
        Ok(client) => client,
        Err(e) => {
            warn!("Could not build LLM client: {e}; using the static catalog");
            return None;
        }
    };

    match client.ping().await {
        Ok(()) => {
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("LLM at {base_url} unavailable ({e}); using the static catalog");
            None
        }
    }
}
