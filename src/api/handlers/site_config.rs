use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::error::AppError;
use crate::models::SiteConfig;

#[derive(Serialize, ToSchema)]
pub struct SaveConfigResponse {
    pub success: bool,
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Current site configuration", body = SiteConfig)
    ),
    tag = "config"
)]
pub async fn get_config(State(state): State<crate::AppState>) -> Json<SiteConfig> {
    Json(state.site_config.load().await)
}

#[utoipa::path(
    post,
    path = "/api/config/save",
    request_body = SiteConfig,
    responses(
        (status = 200, description = "Configuration persisted", body = SaveConfigResponse),
        (status = 400, description = "Invalid configuration")
    ),
    tag = "config"
)]
pub async fn save_config(
    State(state): State<crate::AppState>,
    Json(config): Json<SiteConfig>,
) -> Result<Json<SaveConfigResponse>, AppError> {
    config
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    state.site_config.save(&config).await?;
    tracing::info!("💾 Site configuration saved for {}", config.clinic_name);
    Ok(Json(SaveConfigResponse { success: true }))
}
