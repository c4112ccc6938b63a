mod config;
mod emails;
mod errors;
mod fetch;
mod llm_client;
mod portfolio;
mod routes;
mod state;
mod vector_store;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::emails::pipeline::EmailPipeline;
use crate::fetch::{ContentFetcher, HttpPageLoader};
use crate::llm_client::{Completion, LlmClient};
use crate::portfolio::dataset::load_portfolio_csv;
use crate::portfolio::Portfolio;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_store::ChromaStore;

const PORTFOLIO_COLLECTION: &str = "portfolio";

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

    info!("Starting Coldmail API v{}", env!("CARGO_PKG_VERSION"));

    // Load the portfolio dataset (fails fast on a bad CSV)
    let entries = load_portfolio_csv(Path::new(&config.portfolio_csv_path))?;

    // Connect to the vector index
    let index = ChromaStore::connect(&config.chroma_url, PORTFOLIO_COLLECTION).await?;
    info!("Vector index client initialized");

    let portfolio = Arc::new(Portfolio::new(entries, Arc::new(index)));

    // Initialize LLM client
    let llm: Arc<dyn Completion> = Arc::new(LlmClient::new(config.groq_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the page loader and pipeline
    let fetcher = ContentFetcher::new(Arc::new(HttpPageLoader::new()?));
    let pipeline = Arc::new(EmailPipeline::new(fetcher, llm, Arc::clone(&portfolio)));

    // Build app state
    let state = AppState {
        pipeline,
        portfolio,
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
