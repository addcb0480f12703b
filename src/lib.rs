pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::StudioConfig;
use crate::models::{MediaSections, SiteConfig};
use crate::services::document_store::DocumentStore;
use crate::services::media_service::MediaService;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::health_check,
        api::handlers::media::list_media,
        api::handlers::media::upload_media,
        api::handlers::media::delete_media,
        api::handlers::media::update_transform,
        api::handlers::logo::upload_logo,
        api::handlers::site_config::get_config,
        api::handlers::site_config::save_config,
    ),
    components(
        schemas(
            models::MediaItem,
            models::MediaSections,
            models::MediaType,
            models::SectionKey,
            models::Transform,
            models::SiteConfig,
            models::DoctorInfo,
            models::OfficeHours,
            api::handlers::media::TransformRequest,
            api::handlers::media::DeleteResponse,
            api::handlers::logo::LogoResponse,
            api::handlers::site_config::SaveConfigResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "media", description = "Media ingestion and editing"),
        (name = "config", description = "Site configuration and logo"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: StudioConfig,
    pub content: DocumentStore<MediaSections>,
    pub site_config: DocumentStore<SiteConfig>,
    pub media: Arc<MediaService>,
}

impl AppState {
    pub fn new(config: StudioConfig) -> Self {
        let content = DocumentStore::new(config.content_path());
        let site_config = DocumentStore::new(config.site_config_path());
        let media = Arc::new(MediaService::new(
            config.clone(),
            content.clone(),
            site_config.clone(),
        ));
        Self {
            config,
            content,
            site_config,
            media,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    // Multipart framing adds a little on top of the raw file size.
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_size + 10 * 1024 * 1024);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/api/media", get(api::handlers::media::list_media))
        .route("/api/media/upload", post(api::handlers::media::upload_media))
        .route(
            "/api/media/:section_key/:id",
            delete(api::handlers::media::delete_media),
        )
        .route(
            "/api/media/:section_key/:id/transform",
            patch(api::handlers::media::update_transform),
        )
        .route("/api/logo/upload", post(api::handlers::logo::upload_logo))
        .route("/api/config", get(api::handlers::site_config::get_config))
        .route(
            "/api/config/save",
            post(api::handlers::site_config::save_config),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(body_limit)
        .with_state(state)
}
