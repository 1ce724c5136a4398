mod catalog;
mod config;
mod errors;
mod extraction;
mod models;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::loader::load_catalog;
use crate::config::Config;
use crate::recommendation::scorer::{SimilarityScorer, TfIdfScorer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Question API v{}", env!("CARGO_PKG_VERSION"));

    // Load the question catalog once; refuse to serve on a bad catalog
    let catalog = load_catalog(&config.catalog_path).with_context(|| {
        format!(
            "Question catalog at '{}' is unusable",
            config.catalog_path.display()
        )
    })?;
    let catalog = Arc::new(catalog);

    let scorer: Arc<dyn SimilarityScorer> = Arc::new(TfIdfScorer);
    info!(
        scorer = scorer.name(),
        count_range = ?config.question_count_range(),
        "Recommender initialized"
    );

    let state = AppState {
        config: config.clone(),
        catalog,
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
