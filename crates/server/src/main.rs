use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use shared::protocol::GENERATE_RECIPE_PATH;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod generator;

use app_state::AppState;
use config::load_settings;
use generator::{GeminiGenerator, RecipeGenerator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let generator = GeminiGenerator::new(
        settings.api_key()?,
        &settings.gemini_model,
        &settings.gemini_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build the Gemini client")?;
    info!(
        model = generator.model_name(),
        max_upload_bytes = settings.max_upload_bytes,
        "recipe generator ready"
    );

    let state = AppState {
        generator: Arc::new(generator),
        max_upload_bytes: settings.max_upload_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(api::service_status))
        .route("/healthz", get(api::healthz))
        .route(GENERATE_RECIPE_PATH, post(api::generate_recipe))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
