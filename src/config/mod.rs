use std::env;
use std::path::PathBuf;

/// Runtime configuration for the studio backend.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Root of the site checkout being edited.
    pub site_root: PathBuf,

    /// Maximum accepted upload size in bytes (default: 100 MB).
    pub max_upload_size: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            max_upload_size: 100 * 1024 * 1024,
        }
    }
}

impl StudioConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            site_root: env::var("SITE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.site_root),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),
        }
    }

    pub fn with_site_root(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            ..Self::default()
        }
    }

    /// Media content document consumed by the rendered pages.
    pub fn content_path(&self) -> PathBuf {
        self.site_root.join("src/content/mediaSections.json")
    }

    /// Companion site configuration document.
    pub fn site_config_path(&self) -> PathBuf {
        self.site_root.join("src/config/siteConfig.json")
    }

    /// Static asset tree served by the site.
    pub fn asset_root(&self) -> PathBuf {
        self.site_root.join("public")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StudioConfig::default();
        assert_eq!(config.max_upload_size, 100 * 1024 * 1024);
        assert_eq!(config.site_root, PathBuf::from("."));
    }

    #[test]
    fn test_derived_paths() {
        let config = StudioConfig::with_site_root("/tmp/site");
        assert_eq!(
            config.content_path(),
            PathBuf::from("/tmp/site/src/content/mediaSections.json")
        );
        assert_eq!(config.asset_root(), PathBuf::from("/tmp/site/public"));
    }

    #[test]
    fn test_from_env_override() {
        unsafe { env::set_var("MAX_UPLOAD_SIZE", "1024") };
        let config = StudioConfig::from_env();
        unsafe { env::remove_var("MAX_UPLOAD_SIZE") };
        assert_eq!(config.max_upload_size, 1024);
    }
}
