use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub content_file: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<crate::AppState>) -> impl IntoResponse {
    let content_file = if state.content.path().exists() {
        "present"
    } else {
        "missing"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        content_file: content_file.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
