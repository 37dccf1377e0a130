//! Channel Service
//!
//! Handles channel operations, including banner and icon files.

use std::sync::Arc;

use async_trait::async_trait;

use super::uploads::{replaced_paths, MediaUploads};
use crate::domain::services::{Upload, UploadKind};
use crate::domain::{normalize_channel_name, Channel, ChannelRepository, ServerRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Channel service trait
#[async_trait]
pub trait ChannelService: Send + Sync {
    /// Create a channel in a server
    async fn create_channel(&self, server_id: i64, owner_id: i64, request: CreateChannelDto) -> Result<Channel, AppError>;

    /// Update a channel (owner only)
    async fn update_channel(&self, channel_id: i64, actor_id: i64, update: UpdateChannelDto) -> Result<Channel, AppError>;

    /// Delete a channel (owner only)
    async fn delete_channel(&self, channel_id: i64, actor_id: i64) -> Result<(), AppError>;
}

/// Create channel request
#[derive(Debug, Clone)]
pub struct CreateChannelDto {
    pub name: String,
    pub topic: String,
    pub banner: Option<Upload>,
    pub icon: Option<Upload>,
}

/// Update channel request
#[derive(Debug, Clone, Default)]
pub struct UpdateChannelDto {
    pub name: Option<String>,
    pub topic: Option<String>,
    pub banner: Option<Upload>,
    pub icon: Option<Upload>,
}

/// ChannelService implementation
pub struct ChannelServiceImpl {
    channel_repo: Arc<dyn ChannelRepository>,
    server_repo: Arc<dyn ServerRepository>,
    uploads: MediaUploads,
    id_generator: Arc<SnowflakeGenerator>,
}

impl ChannelServiceImpl {
    pub fn new(
        channel_repo: Arc<dyn ChannelRepository>,
        server_repo: Arc<dyn ServerRepository>,
        uploads: MediaUploads,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            channel_repo,
            server_repo,
            uploads,
            id_generator,
        }
    }

    fn check_images(&self, banner: Option<&Upload>, icon: Option<&Upload>) -> Result<(), AppError> {
        if let Some(banner) = banner {
            self.uploads.check(UploadKind::ChannelBanner, banner)?;
        }
        if let Some(icon) = icon {
            self.uploads.check(UploadKind::ChannelIcon, icon)?;
        }
        Ok(())
    }

    /// Store whichever images were uploaded. On failure, files stored so far are removed.
    async fn store_images(
        &self,
        channel_id: i64,
        banner: Option<&Upload>,
        icon: Option<&Upload>,
    ) -> Result<(Option<String>, Option<String>), AppError> {
        let banner_path = match banner {
            Some(upload) => Some(self.uploads.store(UploadKind::ChannelBanner, channel_id, upload).await?),
            None => None,
        };

        let icon_path = match icon {
            Some(upload) => match self.uploads.store(UploadKind::ChannelIcon, channel_id, upload).await {
                Ok(path) => Some(path),
                Err(e) => {
                    self.uploads.discard(banner_path).await;
                    return Err(e);
                }
            },
            None => None,
        };

        Ok((banner_path, icon_path))
    }

    async fn owned_channel(&self, channel_id: i64, actor_id: i64) -> Result<Channel, AppError> {
        let channel = self
            .channel_repo
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

        if !channel.is_owner(actor_id) {
            return Err(AppError::Forbidden("Only the channel owner can modify it".into()));
        }
        Ok(channel)
    }
}

#[async_trait]
impl ChannelService for ChannelServiceImpl {
    async fn create_channel(&self, server_id: i64, owner_id: i64, request: CreateChannelDto) -> Result<Channel, AppError> {
        if self.server_repo.find_by_id(server_id).await?.is_none() {
            return Err(AppError::NotFound("Server not found".into()));
        }

        self.check_images(request.banner.as_ref(), request.icon.as_ref())?;

        let id = self.id_generator.generate();
        let (banner, icon) = self
            .store_images(id, request.banner.as_ref(), request.icon.as_ref())
            .await?;

        let channel = Channel {
            id,
            name: normalize_channel_name(&request.name),
            owner_id,
            topic: request.topic,
            server_id,
            banner,
            icon,
        };

        match self.channel_repo.create(&channel).await {
            Ok(created) => {
                tracing::info!(channel_id = created.id, server_id, name = %created.name, "Channel created");
                Ok(created)
            }
            Err(e) => {
                self.uploads.discard(channel.asset_paths()).await;
                Err(e)
            }
        }
    }

    async fn update_channel(&self, channel_id: i64, actor_id: i64, update: UpdateChannelDto) -> Result<Channel, AppError> {
        let existing = self.owned_channel(channel_id, actor_id).await?;

        self.check_images(update.banner.as_ref(), update.icon.as_ref())?;

        let (banner, icon) = self
            .store_images(existing.id, update.banner.as_ref(), update.icon.as_ref())
            .await?;

        let mut channel = existing.clone();
        if let Some(name) = update.name {
            channel.name = name;
        }
        if let Some(topic) = update.topic {
            channel.topic = topic;
        }
        if banner.is_some() {
            channel.banner = banner.clone();
        }
        if icon.is_some() {
            channel.icon = icon.clone();
        }
        let channel = channel.normalized();

        let updated = match self.channel_repo.update(&channel).await {
            Ok(updated) => updated,
            Err(e) => {
                self.uploads
                    .discard(replaced_paths(
                        &[banner, icon],
                        &[existing.banner, existing.icon],
                    ))
                    .await;
                return Err(e);
            }
        };

        self.uploads
            .discard(replaced_paths(
                &[existing.banner, existing.icon],
                &[updated.banner.clone(), updated.icon.clone()],
            ))
            .await;

        tracing::info!(channel_id = updated.id, "Channel updated");
        Ok(updated)
    }

    async fn delete_channel(&self, channel_id: i64, actor_id: i64) -> Result<(), AppError> {
        self.owned_channel(channel_id, actor_id).await?;

        let removed = self
            .channel_repo
            .delete(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

        tracing::info!(channel_id, server_id = removed.server_id, "Channel deleted");

        self.uploads.discard(removed.asset_paths()).await;
        Ok(())
    }
}
