mod config;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;
mod triage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::store::JobStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::triage::classifier::{LlmUrgencyClassifier, UrgencyClassifier};
use crate::triage::keywords::build_score_draw;
use crate::triage::Triage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SnowBridge API v{}", env!("CARGO_PKG_VERSION"));

    let triage = build_triage(&config)?;
    info!("Triage backend: {}", triage.backend());

    let store = if config.seed_on_startup {
        JobStore::seeded()
    } else {
        JobStore::new()
    };
    info!("Job store ready with {} jobs", store.count().await);

    let state = AppState {
        store,
        triage,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Detects the LLM capability once. Without an API key, triage is keyword-only.
fn build_triage(config: &Config) -> Result<Triage> {
    let draw = Arc::from(build_score_draw(config.score_mode, config.score_seed));

    let classifier: Option<Arc<dyn UrgencyClassifier>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.triage_timeout)?;
            info!("LLM classifier enabled (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmUrgencyClassifier::new(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; using keyword triage only");
            None
        }
    };

    Ok(Triage::new(classifier, draw, config.triage_timeout))
}
