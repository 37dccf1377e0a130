//! File storage collaborator.

use async_trait::async_trait;
use bytes::Bytes;

use crate::shared::error::AppError;

/// Stores and removes uploaded files by media-root-relative path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `bytes` at `path`, replacing any existing file.
    async fn store(&self, path: &str, bytes: Bytes) -> Result<(), AppError>;

    /// Remove the file at `path`. Removing a missing file is not an error.
    async fn delete(&self, path: &str) -> Result<(), AppError>;
}

/// Delete files no row references any more.
///
/// Cleanup never fails the surrounding operation: errors are logged and skipped.
pub async fn delete_orphaned<I>(store: &dyn FileStore, paths: I)
where
    I: IntoIterator<Item = String>,
{
    for path in paths {
        match store.delete(&path).await {
            Ok(()) => tracing::debug!(path = %path, "Removed orphaned file"),
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to remove orphaned file"),
        }
    }
}
