mod catalog;
mod config;
mod db;
mod errors;
mod extract;
mod guidance;
mod llm_client;
mod matching;
mod models;
mod profiles;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::seed::seed_if_empty;
use crate::config::Config;
use crate::db::create_pool;
use crate::guidance::advisor::{GuidanceAdvisor, GuidanceOracle, LlmGuidanceOracle};
use crate::llm_client::LlmClient;
use crate::matching::oracle::{LlmMatchOracle, MatchOracle, ScoringChain};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PgStore, ScholarshipStore};

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

    info!("Starting ScholarMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    let store: Arc<dyn ScholarshipStore> = Arc::new(PgStore::new(pool));

    if config.seed_catalog_on_empty {
        seed_if_empty(store.as_ref())
            .await
            .context("Failed to seed the scholarship catalog")?;
    }

    // Oracles are optional; without a key every request takes the fallback path
    let (match_oracle, guidance_oracle) = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), Duration::from_secs(config.oracle_timeout_secs))
                .context("Failed to build the LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            let match_oracle: Arc<dyn MatchOracle> = Arc::new(LlmMatchOracle::new(llm.clone()));
            let guidance_oracle: Arc<dyn GuidanceOracle> = Arc::new(LlmGuidanceOracle::new(llm));
            (Some(match_oracle), Some(guidance_oracle))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set: using fallback scores and generic guidance");
            (None, None)
        }
    };

    let state = AppState {
        store,
        scorer: Arc::new(ScoringChain::new(match_oracle)),
        advisor: Arc::new(GuidanceAdvisor::new(guidance_oracle)),
        config: config.clone(),
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
