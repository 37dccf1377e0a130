//! Channel entity and repository trait.
//!
//! Maps to the `channels` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a channel within a server.
///
/// Maps to the `channels` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL -- always lower-case
/// - owner_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - topic: VARCHAR(100) NOT NULL
/// - server_id: BIGINT NOT NULL REFERENCES servers(id) ON DELETE CASCADE
/// - banner: TEXT NULL -- path relative to the media root
/// - icon: TEXT NULL -- path relative to the media root, at most 70x70
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub topic: String,
    pub server_id: i64,
    pub banner: Option<String>,
    pub icon: Option<String>,
}

/// Channel names are stored lower-cased.
pub fn normalize_channel_name(name: &str) -> String {
    name.to_lowercase()
}

impl Channel {
    /// Return this channel with its name in stored (lower-case) form.
    pub fn normalized(mut self) -> Self {
        self.name = normalize_channel_name(&self.name);
        self
    }

    /// Check if a user is the owner of this channel.
    pub fn is_owner(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }

    /// Paths of the files this channel references.
    pub fn asset_paths(&self) -> Vec<String> {
        self.banner.iter().chain(self.icon.iter()).cloned().collect()
    }
}

/// Repository trait for Channel data access operations.
///
/// Implementations store `name` lower-cased on every write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find a channel by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Channel>, AppError>;

    /// Channels of the given servers, ordered by server and then channel id.
    async fn find_by_server_ids(&self, server_ids: &[i64]) -> Result<Vec<Channel>, AppError>;

    /// Create a new channel.
    async fn create(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Update name, topic, banner and icon of an existing channel.
    async fn update(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Delete a channel, returning the removed row.
    async fn delete(&self, id: i64) -> Result<Option<Channel>, AppError>;
}
