//! Server entity, listing filter and repository trait.
//!
//! Maps to the `servers` and `server_members` tables in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::channel::Channel;
use crate::shared::error::AppError;

/// Represents a server in the directory.
///
/// A server is a community space under one category, owned by a user,
/// with a member set and child channels.
///
/// Maps to the `servers` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - owner_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - category_id: BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE
/// - description: VARCHAR(250) NULL
///
/// Membership lives in `server_members (server_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub category_id: i64,
    pub description: Option<String>,
}

impl Server {
    /// Check if a user is the owner of this server.
    pub fn is_owner(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// A server row as returned by a listing, optionally annotated with its member count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    pub server: Server,
    pub member_count: Option<i64>,
}

impl ServerRecord {
    pub fn plain(server: Server) -> Self {
        Self { server, member_count: None }
    }

    pub fn counted(server: Server, member_count: i64) -> Self {
        Self { server, member_count: Some(member_count) }
    }
}

/// Conditions a server listing is narrowed by. All conditions are ANDed,
/// results come back in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    /// Category name or category id (as text)
    pub category: Option<String>,

    /// Only servers this user is a member of
    pub member_id: Option<i64>,

    /// Only the server with this id
    pub server_id: Option<i64>,

    /// Keep the first N rows
    pub limit: Option<i64>,

    /// Annotate each row with its member count
    pub with_member_count: bool,
}

/// Repository trait for Server data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find a server by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError>;

    /// List servers matching a filter, in id order.
    async fn list(&self, filter: &ServerFilter) -> Result<Vec<ServerRecord>, AppError>;

    /// Create a new server and enroll its owner as the first member.
    async fn create(&self, server: &Server) -> Result<Server, AppError>;

    /// Delete a server, cascading to its channels and memberships.
    ///
    /// Returns the channels that were removed, or `None` if the server did not exist.
    async fn delete(&self, id: i64) -> Result<Option<Vec<Channel>>, AppError>;

    /// Check whether a user belongs to a server.
    async fn is_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Add a user to a server's member set.
    async fn add_member(&self, server_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Remove a user from a server's member set. Returns false if they were not a member.
    async fn remove_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError>;
}
