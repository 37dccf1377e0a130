//! Category Service
//!
//! Handles category management, including the category icon file.

use std::sync::Arc;

use async_trait::async_trait;

use super::uploads::{replaced_paths, MediaUploads};
use crate::domain::services::{Upload, UploadKind};
use crate::domain::{Category, CategoryRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List all categories
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// Create a new category
    async fn create_category(&self, request: CreateCategoryDto) -> Result<Category, AppError>;

    /// Update a category, replacing its icon if one is given
    async fn update_category(&self, category_id: i64, update: UpdateCategoryDto) -> Result<Category, AppError>;

    /// Delete a category with everything under it
    async fn delete_category(&self, category_id: i64) -> Result<(), AppError>;
}

/// Create category request
#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<Upload>,
}

/// Update category request
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<Upload>,
}

/// CategoryService implementation
pub struct CategoryServiceImpl {
    category_repo: Arc<dyn CategoryRepository>,
    uploads: MediaUploads,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CategoryServiceImpl {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        uploads: MediaUploads,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            category_repo,
            uploads,
            id_generator,
        }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.find_all().await
    }

    async fn create_category(&self, request: CreateCategoryDto) -> Result<Category, AppError> {
        if let Some(icon) = &request.icon {
            self.uploads.check(UploadKind::CategoryIcon, icon)?;
        }

        let id = self.id_generator.generate();
        let icon = match &request.icon {
            Some(upload) => Some(self.uploads.store(UploadKind::CategoryIcon, id, upload).await?),
            None => None,
        };

        let category = Category {
            id,
            name: request.name,
            description: request.description,
            icon: icon.clone(),
        };

        match self.category_repo.create(&category).await {
            Ok(created) => {
                tracing::info!(category_id = created.id, name = %created.name, "Category created");
                Ok(created)
            }
            Err(e) => {
                self.uploads.discard(icon).await;
                Err(e)
            }
        }
    }

    async fn update_category(&self, category_id: i64, update: UpdateCategoryDto) -> Result<Category, AppError> {
        let existing = self
            .category_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        if let Some(icon) = &update.icon {
            self.uploads.check(UploadKind::CategoryIcon, icon)?;
        }

        let mut category = existing.clone();
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(upload) = &update.icon {
            category.icon = Some(self.uploads.store(UploadKind::CategoryIcon, category.id, upload).await?);
        }

        let updated = match self.category_repo.update(&category).await {
            Ok(updated) => updated,
            Err(e) => {
                self.uploads
                    .discard(replaced_paths(&[category.icon], &[existing.icon]))
                    .await;
                return Err(e);
            }
        };

        self.uploads
            .discard(replaced_paths(&[existing.icon], &[updated.icon.clone()]))
            .await;

        tracing::info!(category_id = updated.id, "Category updated");
        Ok(updated)
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), AppError> {
        let removal = self
            .category_repo
            .delete(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        tracing::info!(
            category_id,
            channels_removed = removal.channels.len(),
            "Category deleted"
        );

        self.uploads.discard(removal.orphaned_assets()).await;
        Ok(())
    }
}
