//! Channel Repository Implementation
//!
//! PostgreSQL implementation of the ChannelRepository trait.
//! Channel names are lower-cased on every write, whatever the caller passed.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{normalize_channel_name, Channel, ChannelRepository};
use crate::shared::error::AppError;

/// Column list matching `ChannelRow`.
pub(crate) const CHANNEL_COLUMNS: &str = "id, name, owner_id, topic, server_id, banner, icon";

/// Database row representation matching the channels table schema.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ChannelRow {
    id: i64,
    name: String,
    owner_id: i64,
    topic: String,
    server_id: i64,
    banner: Option<String>,
    icon: Option<String>,
}

impl ChannelRow {
    /// Convert database row to domain Channel entity.
    pub(crate) fn into_channel(self) -> Channel {
        Channel {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            topic: self.topic,
            server_id: self.server_id,
            banner: self.banner,
            icon: self.icon,
        }
    }
}

/// PostgreSQL channel repository implementation.
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            "SELECT {} FROM channels WHERE id = $1",
            CHANNEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChannelRow::into_channel))
    }

    async fn find_by_server_ids(&self, server_ids: &[i64]) -> Result<Vec<Channel>, AppError> {
        if server_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ChannelRow>(&format!(
            "SELECT {} FROM channels WHERE server_id = ANY($1) ORDER BY server_id, id",
            CHANNEL_COLUMNS
        ))
        .bind(server_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChannelRow::into_channel).collect())
    }

    async fn create(&self, channel: &Channel) -> Result<Channel, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            r#"
            INSERT INTO channels (id, name, owner_id, topic, server_id, banner, icon)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CHANNEL_COLUMNS
        ))
        .bind(channel.id)
        .bind(normalize_channel_name(&channel.name))
        .bind(channel.owner_id)
        .bind(&channel.topic)
        .bind(channel.server_id)
        .bind(&channel.banner)
        .bind(&channel.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Channel"))?;

        Ok(row.into_channel())
    }

    async fn update(&self, channel: &Channel) -> Result<Channel, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            r#"
            UPDATE channels
            SET name = $2,
                topic = $3,
                banner = $4,
                icon = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CHANNEL_COLUMNS
        ))
        .bind(channel.id)
        .bind(normalize_channel_name(&channel.name))
        .bind(&channel.topic)
        .bind(&channel.banner)
        .bind(&channel.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Channel with id {} not found", channel.id)))?;

        Ok(row.into_channel())
    }

    async fn delete(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            "DELETE FROM channels WHERE id = $1 RETURNING {}",
            CHANNEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChannelRow::into_channel))
    }
}
