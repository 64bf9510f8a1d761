use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use scene_editor_lib::assets::AssetSource;
use scene_editor_lib::export::{export_to_component, DEFAULT_FILE_NAME};
use serde_json::{json, Value};
use shared::SceneObject;

use crate::AppState;

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Model files available for placement
pub async fn list_models(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let source = state.models.clone();
    let listed = tokio::task::spawn_blocking(move || source.list_models()).await;

    match listed {
        Ok(Ok(models)) => (StatusCode::OK, Json(json!({ "models": models }))),
        Ok(Err(e)) => {
            tracing::error!("Model listing error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "models": [], "error": e.to_string() })),
            )
        }
        Err(e) => {
            tracing::error!("Model listing task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "models": [], "error": "model listing failed" })),
            )
        }
    }
}

/// Scene objects → React-Three-Fiber component source
pub async fn export_code(Json(objects): Json<Vec<SceneObject>>) -> impl IntoResponse {
    let code = export_to_component(&objects);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{DEFAULT_FILE_NAME}\""),
            ),
        ],
        code,
    )
}
