//! Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use super::channel_repository::ChannelRow;
use crate::domain::{Category, CategoryRemoval, CategoryRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    icon: Option<String>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            icon: self.icon,
        }
    }
}

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn create(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, name, description, icon)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, icon
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Category"))?;

        Ok(row.into_category())
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3,
                icon = $4
            WHERE id = $1
            RETURNING id, name, description, icon
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", category.id)))?;

        Ok(row.into_category())
    }

    async fn delete(&self, id: i64) -> Result<Option<CategoryRemoval>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(category) = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon FROM categories WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        // Channels reached through categories -> servers -> channels
        let channels = sqlx::query_as::<_, ChannelRow>(
            r#"
            SELECT ch.id, ch.name, ch.owner_id, ch.topic, ch.server_id, ch.banner, ch.icon
            FROM channels ch
            INNER JOIN servers s ON s.id = ch.server_id
            WHERE s.category_id = $1
            ORDER BY ch.id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(CategoryRemoval {
            category: category.into_category(),
            channels: channels.into_iter().map(ChannelRow::into_channel).collect(),
        }))
    }
}
