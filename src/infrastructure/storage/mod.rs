//! Media Storage
//!
//! Local-disk implementation of the file store and the image inspector
//! used for icon dimension checks.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::services::{FileStore, ImageDimensions, ImageInspector};
use crate::shared::error::AppError;

/// Stores uploads as plain files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a media-relative path, refusing anything that would escape the root.
    fn resolve(&self, relative: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if escapes || relative.as_os_str().is_empty() {
            return Err(AppError::BadRequest(format!(
                "Invalid media path `{}`",
                relative.display()
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, path: &str, bytes: Bytes) -> Result<(), AppError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(path = %path, size = bytes.len(), "Stored media file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads dimensions from image headers without decoding pixel data.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderImageInspector;

impl ImageInspector for HeaderImageInspector {
    fn dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, AppError> {
        let size = imagesize::blob_size(bytes).map_err(|_| {
            AppError::Validation(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
                    .into(),
            )
        })?;

        Ok(ImageDimensions {
            width: u32::try_from(size.width).unwrap_or(u32::MAX),
            height: u32::try_from(size.height).unwrap_or(u32::MAX),
        })
    }
}
