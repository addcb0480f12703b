use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use utoipa::ToSchema;

use super::media::{map_multipart_error, stage_field};
use crate::api::error::AppError;
use crate::services::media_service::StagedUpload;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoResponse {
    pub logo_url: String,
}

#[utoipa::path(
    post,
    path = "/api/logo/upload",
    request_body(content = Multipart, description = "logo image file"),
    responses(
        (status = 200, description = "Logo stored", body = LogoResponse),
        (status = 400, description = "Missing or invalid logo file")
    ),
    tag = "config"
)]
pub async fn upload_logo(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<LogoResponse>, AppError> {
    let mut logo: Option<StagedUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() == Some("logo") {
            logo = Some(stage_field(field).await?);
        }
    }

    let logo =
        logo.ok_or_else(|| AppError::Validation("missing required field: logo".to_string()))?;
    let logo_url = state.media.ingest_logo(logo).await?;
    Ok(Json(LogoResponse { logo_url }))
}
