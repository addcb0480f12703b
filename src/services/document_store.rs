use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Whole-document JSON persistence for a single structured file.
///
/// Callers load the full document, mutate it in memory and save it back;
/// there is no patch primitive. A missing or corrupt file loads as the
/// document's default so a broken checkout never takes the tool down.
#[derive(Debug, Clone)]
pub struct DocumentStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DocumentStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> T {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return T::default(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "could not parse {}, starting from defaults: {}",
                    self.path.display(),
                    e
                );
                T::default()
            }
        }
    }

    /// Serialize and replace the file atomically: write a sibling temp file,
    /// then rename it over the target, so a concurrent reader never observes
    /// a half-written document.
    pub async fn save(&self, document: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("could not create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(document).context("could not serialize document")?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .with_context(|| format!("could not write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("could not replace {}", self.path.display()))?;
        Ok(())
    }
}
