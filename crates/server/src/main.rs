use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use scene_editor_lib::assets::DirectoryAssetSource;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod routes;

const DEFAULT_MODELS_DIR: &str = "public/assets/models";
const DEFAULT_MODELS_URL_PREFIX: &str = "/assets/models";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<DirectoryAssetSource>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Path the model directory is served under. Axum cannot nest at the root,
/// so an empty prefix falls back to the default.
fn models_mount(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_MODELS_URL_PREFIX.to_string();
    }
    format!("/{trimmed}")
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let models_dir = env_or("MODELS_DIR", DEFAULT_MODELS_DIR);
    let url_prefix = models_mount(&env_or("MODELS_URL_PREFIX", DEFAULT_MODELS_URL_PREFIX));
    let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR);

    let state = AppState {
        models: Arc::new(DirectoryAssetSource::new(&models_dir, url_prefix.clone())),
    };

    let app = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/models", get(routes::list_models))
        .route("/api/export", post(routes::export_code))
        .nest_service(&url_prefix, ServeDir::new(&models_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{bind_addr}, models from {models_dir}");
    axum::serve(listener, app).await
}
