mod analysis;
mod config;
mod embedding;
mod errors;
mod matching;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AtsScorer;
use crate::config::Config;
use crate::embedding::{HttpEmbedder, ModelHandle};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resumerev_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeRev API v{}", env!("CARGO_PKG_VERSION"));

    let model = build_model_handle(&config)?;
    // Probe once up front so the first request does not pay for it.
    if !model.ensure_loaded().await {
        warn!("Embedding model unavailable; scoring will use statistical fallbacks");
    }

    let scorer = Arc::new(AtsScorer::new(model, config.scoring()));

    let state = AppState {
        config: config.clone(),
        scorer,
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

fn build_model_handle(config: &Config) -> Result<ModelHandle> {
    let Some(url) = &config.embedding_url else {
        warn!("EMBEDDING_URL not set; running without an embedding model");
        return Ok(ModelHandle::unavailable());
    };
    let embedder = HttpEmbedder::new(
        url,
        config.embedding_model.clone(),
        config.embedding_api_key.clone(),
    )?;
    info!("Embedding backend: {} at {url}", config.embedding_model);
    Ok(ModelHandle::new(Arc::new(embedder)))
}
