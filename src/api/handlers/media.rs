use std::io::Write;

use axum::{
    Json,
    extract::{
        Path, State,
        multipart::{Field, Multipart, MultipartError},
    },
};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use utoipa::ToSchema;

use crate::api::error::AppError;
use crate::models::{MediaItem, MediaSections, MediaType, SectionKey, Transform};
use crate::services::media_service::{IngestRequest, StagedUpload};

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub scale: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
}

#[utoipa::path(
    get,
    path = "/api/media",
    responses(
        (status = 200, description = "Full content document", body = MediaSections)
    ),
    tag = "media"
)]
pub async fn list_media(State(state): State<crate::AppState>) -> Json<MediaSections> {
    Json(state.content.load().await)
}

#[utoipa::path(
    post,
    path = "/api/media/upload",
    request_body(content = Multipart, description = "file, optional poster, sectionKey, mediaType, description"),
    responses(
        (status = 200, description = "Media stored and recorded", body = MediaItem),
        (status = 400, description = "Missing or invalid fields"),
        (status = 422, description = "Asset could not be processed")
    ),
    tag = "media"
)]
pub async fn upload_media(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<MediaItem>, AppError> {
    let mut file: Option<StagedUpload> = None;
    let mut poster: Option<StagedUpload> = None;
    let mut section_key: Option<String> = None;
    let mut media_type: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => file = Some(stage_field(field).await?),
            "poster" => poster = Some(stage_field(field).await?),
            "sectionKey" => section_key = Some(field.text().await.map_err(map_multipart_error)?),
            "mediaType" => media_type = Some(field.text().await.map_err(map_multipart_error)?),
            "description" => {
                let text = field.text().await.map_err(map_multipart_error)?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("missing required field: file".to_string()))?;
    let section_key = section_key
        .ok_or_else(|| AppError::Validation("missing required field: sectionKey".to_string()))?;
    let section = SectionKey::parse(&section_key)
        .ok_or_else(|| AppError::Validation(format!("unknown section: {section_key}")))?;
    let media_type = media_type
        .ok_or_else(|| AppError::Validation("missing required field: mediaType".to_string()))?;
    let media_type = MediaType::parse(&media_type)
        .ok_or_else(|| AppError::Validation(format!("unknown media type: {media_type}")))?;

    let item = state
        .media
        .ingest(IngestRequest {
            section,
            media_type,
            description,
            file,
            poster,
        })
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/media/{section_key}/{id}",
    params(
        ("section_key" = String, Path, description = "Section the item belongs to"),
        ("id" = String, Path, description = "Media item id")
    ),
    responses(
        (status = 200, description = "Item and backing files removed", body = DeleteResponse),
        (status = 404, description = "Section or item not found")
    ),
    tag = "media"
)]
pub async fn delete_media(
    State(state): State<crate::AppState>,
    Path((section_key, id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, AppError> {
    let section = parse_section(&section_key)?;
    state.media.delete(section, &id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

#[utoipa::path(
    patch,
    path = "/api/media/{section_key}/{id}/transform",
    params(
        ("section_key" = String, Path, description = "Section the item belongs to"),
        ("id" = String, Path, description = "Media item id")
    ),
    request_body = TransformRequest,
    responses(
        (status = 200, description = "Updated item", body = MediaItem),
        (status = 400, description = "Missing transform fields"),
        (status = 404, description = "Section or item not found")
    ),
    tag = "media"
)]
pub async fn update_transform(
    State(state): State<crate::AppState>,
    Path((section_key, id)): Path<(String, String)>,
    Json(request): Json<TransformRequest>,
) -> Result<Json<MediaItem>, AppError> {
    let section = parse_section(&section_key)?;

    let (Some(scale), Some(offset_x), Some(offset_y)) =
        (request.scale, request.offset_x, request.offset_y)
    else {
        return Err(AppError::Validation(
            "scale, offsetX and offsetY are required".to_string(),
        ));
    };

    let item = state
        .media
        .save_transform(
            section,
            &id,
            Transform {
                scale,
                offset_x,
                offset_y,
            },
        )
        .await?;
    Ok(Json(item))
}

/// Unknown sections in a path position are a 404, not a 400: the URL names
/// a resource that does not exist.
fn parse_section(section_key: &str) -> Result<SectionKey, AppError> {
    SectionKey::parse(section_key)
        .ok_or_else(|| AppError::NotFound(format!("unknown section: {section_key}")))
}

/// Spool a multipart file field to a temp file owned by the request.
pub(super) async fn stage_field(mut field: Field<'_>) -> Result<StagedUpload, AppError> {
    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let mut staged = NamedTempFile::new()?;
    while let Some(chunk) = field.chunk().await.map_err(map_multipart_error)? {
        staged.write_all(&chunk)?;
    }
    Ok(StagedUpload::new(staged, file_name))
}

pub(super) fn map_multipart_error(err: MultipartError) -> AppError {
    let message = err.to_string();
    if message.contains("length limit exceeded") {
        AppError::PayloadTooLarge("request body exceeds the configured upload limit".to_string())
    } else {
        AppError::Validation(message)
    }
}
