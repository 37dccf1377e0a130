//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::{ServerList, ServerListing};
use crate::domain::{Category, Channel, Server};

/// Server response as rendered by the directory listing
#[derive(Debug, Serialize)]
pub struct ServerResponse {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub category: i64,
    pub description: Option<String>,
    pub channel_server: Vec<ChannelResponse>,
    /// Outer `None` omits the key; `Some(None)` renders `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_members: Option<Option<i64>>,
}

impl ServerResponse {
    pub fn from_listing(listing: ServerListing, include_member_count: bool) -> Self {
        let mut response = Self::from_server(listing.server, listing.channels);
        if include_member_count {
            response.num_members = Some(listing.member_count);
        }
        response
    }

    pub fn from_server(server: Server, channels: Vec<Channel>) -> Self {
        Self {
            id: server.id,
            name: server.name,
            owner: server.owner_id,
            category: server.category_id,
            description: server.description,
            channel_server: channels.into_iter().map(ChannelResponse::from).collect(),
            num_members: None,
        }
    }
}

/// Render a listing in the order the store returned it.
pub fn shape_server_list(list: ServerList) -> Vec<ServerResponse> {
    let include_member_count = list.include_member_count;
    list.servers
        .into_iter()
        .map(|listing| ServerResponse::from_listing(listing, include_member_count))
        .collect()
}

/// Channel response
#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub topic: String,
    pub server: i64,
    pub banner: Option<String>,
    pub icon: Option<String>,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            owner: channel.owner_id,
            topic: channel.topic,
            server: channel.server_id,
            banner: channel.banner,
            icon: channel.icon,
        }
    }
}

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            icon: category.icon,
        }
    }
}
