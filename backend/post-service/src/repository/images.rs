use super::ImageStore;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

const PNG_EXT: &str = "png";

/// Image storage on the local filesystem: `<dir>/<uuid>.png`
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Only canonical UUIDs map to a path, so a reference can never escape `dir`.
    fn path_for(&self, image_id: &str) -> Option<PathBuf> {
        let id = Uuid::parse_str(image_id).ok()?;
        Some(self.dir.join(format!("{}.{}", id.hyphenated(), PNG_EXT)))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn exists(&self, image_id: &str) -> StoreResult<bool> {
        let Some(path) = self.path_for(image_id) else {
            return Ok(false);
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, bytes: &[u8]) -> StoreResult<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let id = Uuid::new_v4().hyphenated().to_string();
        let path = self.dir.join(format!("{}.{}", id, PNG_EXT));
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(image_id = %id, size = bytes.len(), "image stored");
        Ok(id)
    }

    async fn open(&self, image_id: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(image_id).ok_or(StoreError::NotFound)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
