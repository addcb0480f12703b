use std::path::Path;

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::config::StudioConfig;
use crate::models::{MediaItem, MediaSections, MediaType, SectionKey, SiteConfig, Transform};
use crate::services::document_store::DocumentStore;
use crate::services::image_processor::{self, ProcessedImage};
use crate::utils::slug::slugify;

/// Width ceiling for processed poster stills.
pub const POSTER_WIDTH_CEILING: u32 = 800;

/// Width ceiling for the site logo.
pub const LOGO_WIDTH_CEILING: u32 = 300;

/// An uploaded file spooled to a temp location while a request is being
/// processed. The backing file is removed when the handle drops, so
/// staged uploads are cleaned up on success and failure alike.
pub struct StagedUpload {
    file: NamedTempFile,
    file_name: String,
}

impl StagedUpload {
    pub fn new(file: NamedTempFile, file_name: String) -> Self {
        Self { file, file_name }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }
}

pub struct IngestRequest {
    pub section: SectionKey,
    pub media_type: MediaType,
    pub description: Option<String>,
    pub file: StagedUpload,
    pub poster: Option<StagedUpload>,
}

/// Accepts uploads, processes them into web-optimized assets under the
/// static asset tree and keeps the content document in sync.
pub struct MediaService {
    config: StudioConfig,
    content: DocumentStore<MediaSections>,
    site_config: DocumentStore<SiteConfig>,
}

impl MediaService {
    pub fn new(
        config: StudioConfig,
        content: DocumentStore<MediaSections>,
        site_config: DocumentStore<SiteConfig>,
    ) -> Self {
        Self {
            config,
            content,
            site_config,
        }
    }

    /// Process one upload and append (or, for capped sections, replace) its
    /// record. Nothing is recorded unless processing succeeds.
    pub async fn ingest(&self, request: IngestRequest) -> Result<MediaItem, AppError> {
        let data = request.file.read().await?;
        check_media_kind(&data, request.media_type)?;

        // Encode failures must surface before anything lands on disk.
        let processed = match request.media_type {
            MediaType::Image => Some(self.process_image(&data, request.section)?),
            MediaType::Video => None,
        };
        let processed_poster = match &request.poster {
            Some(poster) => {
                let poster_data = poster.read().await?;
                if !infer::is_image(&poster_data) {
                    return Err(AppError::Validation(
                        "poster file does not look like an image".to_string(),
                    ));
                }
                Some(
                    image_processor::process_to_webp(&poster_data, POSTER_WIDTH_CEILING)
                        .map_err(|e| AppError::Processing(e.to_string()))?,
                )
            }
            None => None,
        };

        let site = self.site_config.load().await;
        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        let file_name = derive_file_name(request.section, request.media_type, &site.city, description);
        let folder = request.section.asset_folder();

        let dest_dir = self
            .config
            .asset_root()
            .join(request.media_type.base_folder())
            .join(folder);
        tokio::fs::create_dir_all(&dest_dir).await?;
        let dest = dest_dir.join(&file_name);

        match &processed {
            Some(image) => {
                tokio::fs::write(&dest, &image.bytes).await?;
                info!(
                    "🖼️  Stored {} ({}x{}, {} bytes)",
                    dest.display(),
                    image.width,
                    image.height,
                    image.bytes.len()
                );
            }
            None => {
                tokio::fs::copy(request.file.path(), &dest).await?;
                info!("🎞️  Stored {}", dest.display());
            }
        }

        let poster_src = match processed_poster {
            Some(poster) => {
                let poster_name = poster_file_name(&file_name);
                let poster_dir = self.config.asset_root().join("images").join(folder);
                tokio::fs::create_dir_all(&poster_dir).await?;
                tokio::fs::write(poster_dir.join(&poster_name), &poster.bytes).await?;
                Some(format!("/images/{folder}/{poster_name}"))
            }
            None => None,
        };

        let item = MediaItem {
            id: Uuid::new_v4().to_string(),
            media_type: request.media_type,
            src: format!(
                "/{}/{}/{}",
                request.media_type.base_folder(),
                folder,
                file_name
            ),
            alt: request.section.alt_text(description, &site.city),
            description: description.map(str::to_string),
            poster: poster_src,
            order: 0,
            transform: None,
        };

        let mut sections = self.content.load().await;
        let stored = sections.insert(request.section, item);
        self.content.save(&sections).await?;
        Ok(stored)
    }

    /// Remove a record together with its backing files. Physical deletion is
    /// best-effort; the record mutation is what counts.
    pub async fn delete(&self, section: SectionKey, id: &str) -> Result<(), AppError> {
        let mut sections = self.content.load().await;
        let removed = sections.remove(section, id).ok_or_else(|| {
            AppError::NotFound(format!("media item {id} not found in {}", section.as_str()))
        })?;
        self.content.save(&sections).await?;

        self.remove_asset(&removed.src).await;
        if let Some(poster) = &removed.poster {
            self.remove_asset(poster).await;
        }
        info!("🗑️  Removed {} from {}", removed.src, section.as_str());
        Ok(())
    }

    /// Persist an operator-adjusted framing for one item.
    pub async fn save_transform(
        &self,
        section: SectionKey,
        id: &str,
        transform: Transform,
    ) -> Result<MediaItem, AppError> {
        let mut sections = self.content.load().await;
        let item = sections.find_mut(section, id).ok_or_else(|| {
            AppError::NotFound(format!("media item {id} not found in {}", section.as_str()))
        })?;
        item.transform = Some(transform.clamped());
        let updated = item.clone();
        self.content.save(&sections).await?;
        Ok(updated)
    }

    /// Process and store the site logo, returning its public URL. The
    /// operator saves the URL into the site configuration afterwards.
    pub async fn ingest_logo(&self, file: StagedUpload) -> Result<String, AppError> {
        let data = file.read().await?;
        if !infer::is_image(&data) {
            return Err(AppError::Validation(
                "uploaded logo does not look like an image".to_string(),
            ));
        }

        let processed = image_processor::process_to_webp(&data, LOGO_WIDTH_CEILING)
            .map_err(|e| AppError::Processing(e.to_string()))?;

        let site = self.site_config.load().await;
        let file_name = format!(
            "logo-{}-{}.webp",
            slugify(&site.city),
            Utc::now().timestamp_millis()
        );
        let dir = self.config.asset_root().join("images").join("logo");
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &processed.bytes).await?;

        info!("🏷️  Stored logo {file_name}");
        Ok(format!("/images/logo/{file_name}"))
    }

    fn process_image(&self, data: &[u8], section: SectionKey) -> Result<ProcessedImage, AppError> {
        image_processor::process_to_webp(data, section.image_width_ceiling())
            .map_err(|e| AppError::Processing(e.to_string()))
    }

    async fn remove_asset(&self, src: &str) {
        let path = self.config.asset_root().join(src.trim_start_matches('/'));
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("could not remove asset file {}: {}", path.display(), e);
        }
    }
}

fn check_media_kind(data: &[u8], media_type: MediaType) -> Result<(), AppError> {
    let matches = match media_type {
        MediaType::Image => infer::is_image(data),
        MediaType::Video => infer::is_video(data),
    };
    if matches {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "uploaded file does not look like a {}",
            media_type.as_str()
        )))
    }
}

fn derive_file_name(
    section: SectionKey,
    media_type: MediaType,
    city: &str,
    description: Option<&str>,
) -> String {
    let city_slug = slugify(city);
    let desc_slug = match description {
        Some(text) => slugify(text),
        None => slugify(section.as_str()),
    };
    format!(
        "{}-{}-{}-{}.{}",
        media_type.slug_prefix(),
        city_slug,
        desc_slug,
        Utc::now().timestamp_millis(),
        media_type.extension()
    )
}

fn poster_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(file_name);
    format!("{base}-poster.webp")
}
