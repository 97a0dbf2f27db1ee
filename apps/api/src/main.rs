mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod tailoring;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::fonts;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tailoring::{LlmTailoringService, TailoringService};
use crate::templates::TEMPLATES;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae v{}", env!("CARGO_PKG_VERSION"));

    let faces = fonts::register_defaults();
    info!("Font registry ready ({faces} faces)");
    info!("Templates: {}", TEMPLATES.keys().join(", "));

    let tailoring: Option<Arc<dyn TailoringService>> = match &config.llm_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_base_url.clone())
                .context("failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmTailoringService::new(llm)))
        }
        None => {
            warn!("LLM_API_KEY not set; tailoring endpoint disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        tailoring,
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
