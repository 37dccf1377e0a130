//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **ServerListingService**: The server directory listing
//! - **ServerService**: Server creation, deletion and membership
//! - **ChannelService**: Channel operations and channel images
//! - **CategoryService**: Category management and category icons

pub mod category_service;
pub mod channel_service;
pub mod server_listing;
pub mod server_service;
pub mod uploads;

// Re-export listing types
pub use server_listing::{
    plan_server_list, ServerList, ServerListParams, ServerListPlan, ServerListing,
    ServerListingService, ServerListingServiceImpl,
};

// Re-export server service types
pub use server_service::{CreateServerDto, ServerService, ServerServiceImpl};

// Re-export channel service types
pub use channel_service::{ChannelService, ChannelServiceImpl, CreateChannelDto, UpdateChannelDto};

// Re-export category service types
pub use category_service::{CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto};

pub use uploads::MediaUploads;
