use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

pub struct RootController;

impl RootController {
    pub async fn root() -> impl IntoResponse {
        Json(json!({ "service": "wedding-backend", "status": "ok" }))
    }

    pub async fn health_check() -> impl IntoResponse {
        (StatusCode::OK, Json(json!({ "status": "healthy" })))
    }
}
