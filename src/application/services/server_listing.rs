//! Server Listing Service
//!
//! Turns directory listing parameters and the caller's identity into a
//! `ServerFilter`, runs it, and attaches each server's channels.
//!
//! The parameters are applied in a fixed order and three of them *replace*
//! the accumulated filter instead of narrowing it:
//!
//! 1. `category` narrows the base set
//! 2. the caller's membership narrows it further (authentication required)
//! 3. `number_of_members` replaces the filter with the base set, annotated with counts
//! 4. `qty` replaces the filter with the first N rows of the base set
//! 5. `server_id` replaces the filter with the matching row of the base set
//!
//! Clients depend on this precedence; see DESIGN.md before changing it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Channel, ChannelRepository, Server, ServerFilter, ServerRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Listing parameters as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerListParams {
    /// Category name or id
    pub category: Option<String>,
    /// Raw row limit, validated while planning
    pub qty: Option<String>,
    /// Only the caller's servers (forced on for authenticated callers)
    pub by_user: bool,
    /// Raw server id, validated while planning
    pub server_id: Option<String>,
    /// Annotate servers with their member count
    pub number_of_members: bool,
}

/// A planned listing: the store filter plus whether `num_members` is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerListPlan {
    pub filter: ServerFilter,
    pub include_member_count: bool,
}

/// Plan a listing without touching the store.
///
/// `caller` is the authenticated user's id, if any.
pub fn plan_server_list(
    params: &ServerListParams,
    caller: Option<i64>,
) -> Result<ServerListPlan, AppError> {
    let base = ServerFilter {
        category: params.category.clone(),
        ..Default::default()
    };

    // Authentication forces membership listing on, regardless of by_user.
    let by_user = caller.is_some() || params.by_user;
    let member_id = match (by_user, caller) {
        (true, Some(user_id)) => user_id,
        _ => return Err(AppError::authentication_required()),
    };

    let mut filter = ServerFilter {
        member_id: Some(member_id),
        ..base.clone()
    };

    if params.number_of_members {
        filter = ServerFilter {
            with_member_count: true,
            ..base.clone()
        };
    }

    if let Some(qty) = &params.qty {
        filter = ServerFilter {
            limit: Some(parse_qty(qty)?),
            ..base.clone()
        };
    }

    if let Some(raw_id) = &params.server_id {
        if caller.is_none() {
            return Err(AppError::Unauthorized(
                "Authentication credentials were not provided.".into(),
            ));
        }
        filter = ServerFilter {
            server_id: Some(parse_server_id(raw_id)?),
            ..base
        };
    }

    Ok(ServerListPlan {
        filter,
        include_member_count: params.number_of_members,
    })
}

fn parse_qty(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<u32>()
        .map(i64::from)
        .map_err(|_| {
            AppError::Validation(format!(
                "Invalid qty `{}`: expected a non-negative integer",
                raw
            ))
        })
}

fn parse_server_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::Validation(format!("Field 'id' expected a number but got '{}'.", raw))
    })
}

/// A listed server with its channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerListing {
    pub server: Server,
    pub member_count: Option<i64>,
    pub channels: Vec<Channel>,
}

/// Result of a listing: servers in natural order and the `num_members` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerList {
    pub servers: Vec<ServerListing>,
    pub include_member_count: bool,
}

/// Server listing service trait
#[async_trait]
pub trait ServerListingService: Send + Sync {
    /// List servers for a caller.
    async fn list_servers(
        &self,
        params: &ServerListParams,
        caller: Option<i64>,
    ) -> Result<ServerList, AppError>;
}

/// ServerListingService implementation
pub struct ServerListingServiceImpl {
    server_repo: Arc<dyn ServerRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
}

impl ServerListingServiceImpl {
    pub fn new(
        server_repo: Arc<dyn ServerRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
    ) -> Self {
        Self {
            server_repo,
            channel_repo,
        }
    }
}

#[async_trait]
impl ServerListingService for ServerListingServiceImpl {
    async fn list_servers(
        &self,
        params: &ServerListParams,
        caller: Option<i64>,
    ) -> Result<ServerList, AppError> {
        let plan = plan_server_list(params, caller)?;
        tracing::debug!(filter = ?plan.filter, include_member_count = plan.include_member_count, "Planned server listing");

        let records = self.server_repo.list(&plan.filter).await?;

        if let Some(server_id) = plan.filter.server_id {
            if records.is_empty() {
                return Err(AppError::Validation(format!(
                    "Server with ID `{}` not found",
                    server_id
                )));
            }
        }

        let server_ids: Vec<i64> = records.iter().map(|r| r.server.id).collect();
        let mut channels_by_server: HashMap<i64, Vec<Channel>> = HashMap::new();
        for channel in self.channel_repo.find_by_server_ids(&server_ids).await? {
            channels_by_server
                .entry(channel.server_id)
                .or_default()
                .push(channel);
        }

        let servers: Vec<ServerListing> = records
            .into_iter()
            .map(|record| ServerListing {
                channels: channels_by_server
                    .remove(&record.server.id)
                    .unwrap_or_default(),
                server: record.server,
                member_count: record.member_count,
            })
            .collect();

        metrics::record_server_list(servers.len(), plan.include_member_count);

        Ok(ServerList {
            servers,
            include_member_count: plan.include_member_count,
        })
    }
}
