//! Category entity and repository trait.
//!
//! Maps to the `categories` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::channel::Channel;
use crate::shared::error::AppError;

/// A grouping of servers (e.g. "Gaming", "Music").
///
/// Maps to the `categories` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - description: TEXT NULL
/// - icon: TEXT NULL -- path relative to the media root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Everything a category delete removed from the store.
///
/// The channels are the ones dropped by the `categories -> servers -> channels`
/// cascade; their files become orphaned along with the category icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub category: Category,
    pub channels: Vec<Channel>,
}

impl CategoryRemoval {
    /// Stored files that no longer have an owning row.
    pub fn orphaned_assets(&self) -> Vec<String> {
        self.category
            .icon
            .iter()
            .cloned()
            .chain(self.channels.iter().flat_map(Channel::asset_paths))
            .collect()
    }
}

/// Repository trait for Category data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// All categories in natural (id) order.
    async fn find_all(&self) -> Result<Vec<Category>, AppError>;

    /// Create a new category.
    async fn create(&self, category: &Category) -> Result<Category, AppError>;

    /// Update name, description and icon of an existing category.
    async fn update(&self, category: &Category) -> Result<Category, AppError>;

    /// Delete a category, cascading to its servers and their channels.
    ///
    /// Returns `None` when no category has this ID.
    async fn delete(&self, id: i64) -> Result<Option<CategoryRemoval>, AppError>;
}
