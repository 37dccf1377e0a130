//! Server Service
//!
//! Handles server creation, deletion and membership.

use std::sync::Arc;

use async_trait::async_trait;

use super::uploads::MediaUploads;
use crate::domain::{Channel, CategoryRepository, Server, ServerRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Server service trait
#[async_trait]
pub trait ServerService: Send + Sync {
    /// Create a server owned by `owner_id`, who becomes its first member
    async fn create_server(&self, owner_id: i64, request: CreateServerDto) -> Result<Server, AppError>;

    /// Delete a server (owner only)
    async fn delete_server(&self, server_id: i64, actor_id: i64) -> Result<(), AppError>;

    /// Join a server
    async fn join_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Leave a server
    async fn leave_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError>;
}

/// Create server request
#[derive(Debug, Clone)]
pub struct CreateServerDto {
    pub name: String,
    pub category_id: i64,
    pub description: Option<String>,
}

/// ServerService implementation
pub struct ServerServiceImpl {
    server_repo: Arc<dyn ServerRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    uploads: MediaUploads,
    id_generator: Arc<SnowflakeGenerator>,
}

impl ServerServiceImpl {
    pub fn new(
        server_repo: Arc<dyn ServerRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        uploads: MediaUploads,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            server_repo,
            category_repo,
            uploads,
            id_generator,
        }
    }

    async fn existing(&self, server_id: i64) -> Result<Server, AppError> {
        self.server_repo
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".into()))
    }
}

#[async_trait]
impl ServerService for ServerServiceImpl {
    async fn create_server(&self, owner_id: i64, request: CreateServerDto) -> Result<Server, AppError> {
        if self.category_repo.find_by_id(request.category_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Category with ID `{}` does not exist",
                request.category_id
            )));
        }

        let server = Server {
            id: self.id_generator.generate(),
            name: request.name,
            owner_id,
            category_id: request.category_id,
            description: request.description,
        };

        let created = self.server_repo.create(&server).await?;
        tracing::info!(server_id = created.id, owner_id, "Server created");
        Ok(created)
    }

    async fn delete_server(&self, server_id: i64, actor_id: i64) -> Result<(), AppError> {
        let server = self.existing(server_id).await?;
        if !server.is_owner(actor_id) {
            return Err(AppError::Forbidden("Only the server owner can delete it".into()));
        }

        let channels = self
            .server_repo
            .delete(server_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".into()))?;

        tracing::info!(server_id, channels_removed = channels.len(), "Server deleted");

        self.uploads
            .discard(channels.iter().flat_map(Channel::asset_paths))
            .await;
        Ok(())
    }

    async fn join_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError> {
        self.existing(server_id).await?;

        if self.server_repo.is_member(server_id, user_id).await? {
            return Err(AppError::Conflict("Already a member of this server".into()));
        }

        self.server_repo.add_member(server_id, user_id).await?;
        tracing::info!(server_id, user_id, "Member joined server");
        Ok(())
    }

    async fn leave_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError> {
        let server = self.existing(server_id).await?;
        if server.is_owner(user_id) {
            return Err(AppError::Forbidden("The server owner cannot leave the server".into()));
        }

        if !self.server_repo.remove_member(server_id, user_id).await? {
            return Err(AppError::NotFound("Not a member of this server".into()));
        }

        tracing::info!(server_id, user_id, "Member left server");
        Ok(())
    }
}
