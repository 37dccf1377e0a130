//! Upload handling shared by the category and channel services.

use std::sync::Arc;

use crate::domain::services::{
    delete_orphaned, upload_path, validate_upload, FileStore, ImageInspector, Upload, UploadKind,
};
use crate::shared::error::AppError;

/// Validates and stores uploaded images, and removes files that lost their row.
#[derive(Clone)]
pub struct MediaUploads {
    files: Arc<dyn FileStore>,
    images: Arc<dyn ImageInspector>,
}

impl MediaUploads {
    pub fn new(files: Arc<dyn FileStore>, images: Arc<dyn ImageInspector>) -> Self {
        Self { files, images }
    }

    /// Run the checks for `kind` without storing anything.
    pub fn check(&self, kind: UploadKind, upload: &Upload) -> Result<(), AppError> {
        validate_upload(kind, upload, self.images.as_ref())
    }

    /// Store an already checked upload, returning its media-relative path.
    pub async fn store(
        &self,
        kind: UploadKind,
        owner_id: i64,
        upload: &Upload,
    ) -> Result<String, AppError> {
        let path = upload_path(kind, owner_id, &upload.filename)?;
        self.files.store(&path, upload.bytes.clone()).await?;
        Ok(path)
    }

    /// Best-effort removal of files no row references.
    pub async fn discard<I>(&self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        delete_orphaned(self.files.as_ref(), paths).await;
    }
}

/// Paths in `before` that are no longer referenced by `after`.
pub(crate) fn replaced_paths(before: &[Option<String>], after: &[Option<String>]) -> Vec<String> {
    before
        .iter()
        .flatten()
        .filter(|old| !after.iter().flatten().any(|new| new == *old))
        .cloned()
        .collect()
}
