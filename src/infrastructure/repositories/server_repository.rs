//! Server Repository Implementation
//!
//! PostgreSQL implementation of the ServerRepository trait, including the
//! dynamic listing query used by the server directory endpoint.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::channel_repository::{ChannelRow, CHANNEL_COLUMNS};
use crate::domain::{Channel, Server, ServerFilter, ServerRecord, ServerRepository};
use crate::shared::error::AppError;

/// Database row representation matching the servers table schema,
/// plus the optional `num_members` aggregate.
#[derive(Debug, sqlx::FromRow)]
struct ServerRow {
    id: i64,
    name: String,
    owner_id: i64,
    category_id: i64,
    description: Option<String>,
    #[sqlx(default)]
    num_members: Option<i64>,
}

impl ServerRow {
    fn into_server(self) -> Server {
        Server {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            category_id: self.category_id,
            description: self.description,
        }
    }

    fn into_record(self) -> ServerRecord {
        let member_count = self.num_members;
        ServerRecord {
            server: self.into_server(),
            member_count,
        }
    }
}

/// Build the listing query for a filter.
///
/// Conditions are appended in a fixed order so the generated SQL, and the
/// bind positions, depend only on which filter fields are set.
fn list_query(filter: &ServerFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT s.id, s.name, s.owner_id, s.category_id, s.description, ",
    );

    if filter.with_member_count {
        qb.push("(SELECT COUNT(*) FROM server_members m WHERE m.server_id = s.id) AS num_members");
    } else {
        qb.push("NULL::BIGINT AS num_members");
    }

    qb.push(" FROM servers s JOIN categories c ON c.id = s.category_id WHERE TRUE");

    if let Some(category) = &filter.category {
        qb.push(" AND (c.name = ")
            .push_bind(category.clone())
            .push(" OR c.id::TEXT = ")
            .push_bind(category.clone())
            .push(")");
    }

    if let Some(member_id) = filter.member_id {
        qb.push(" AND EXISTS (SELECT 1 FROM server_members sm WHERE sm.server_id = s.id AND sm.user_id = ")
            .push_bind(member_id)
            .push(")");
    }

    if let Some(server_id) = filter.server_id {
        qb.push(" AND s.id = ").push_bind(server_id);
    }

    qb.push(" ORDER BY s.id");

    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    qb
}

/// PostgreSQL server repository implementation.
#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    /// Create a new PgServerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError> {
        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            SELECT id, name, owner_id, category_id, description
            FROM servers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ServerRow::into_server))
    }

    async fn list(&self, filter: &ServerFilter) -> Result<Vec<ServerRecord>, AppError> {
        let mut qb = list_query(filter);
        tracing::debug!(sql = qb.sql(), ?filter, "Listing servers");

        let rows = qb
            .build_query_as::<ServerRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ServerRow::into_record).collect())
    }

    async fn create(&self, server: &Server) -> Result<Server, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            INSERT INTO servers (id, name, owner_id, category_id, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, owner_id, category_id, description
            "#,
        )
        .bind(server.id)
        .bind(&server.name)
        .bind(server.owner_id)
        .bind(server.category_id)
        .bind(&server.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "Server"))?;

        // Add owner as the first member
        sqlx::query(
            r#"
            INSERT INTO server_members (server_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (server_id, user_id) DO NOTHING
            "#,
        )
        .bind(server.id)
        .bind(server.owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_server())
    }

    async fn delete(&self, id: i64) -> Result<Option<Vec<Channel>>, AppError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM servers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Ok(None);
        }

        // Capture the channels before the cascade removes them
        let channels = sqlx::query_as::<_, ChannelRow>(&format!(
            "SELECT {} FROM channels WHERE server_id = $1 ORDER BY id",
            CHANNEL_COLUMNS
        ))
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(channels.into_iter().map(ChannelRow::into_channel).collect()))
    }

    async fn is_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError> {
        let is_member = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM server_members WHERE server_id = $1 AND user_id = $2)",
        )
        .bind(server_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(is_member)
    }

    async fn add_member(&self, server_id: i64, user_id: i64) -> Result<(), AppError> {
        sqlx::query("INSERT INTO server_members (server_id, user_id) VALUES ($1, $2)")
            .bind(server_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Membership"))?;

        Ok(())
    }

    async fn remove_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM server_members WHERE server_id = $1 AND user_id = $2")
            .bind(server_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
