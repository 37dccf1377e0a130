//! # Domain Entities
//!
//! Core domain entities representing the directory's business objects.
//! All entities map directly to their corresponding database tables.
//!
//! - **Category**: A grouping of servers
//! - **Server**: A community owned by a user, under one category, with members
//! - **Channel**: A named sub-topic within a server, with optional banner and icon
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod category;
mod channel;
mod server;

pub use category::{Category, CategoryRemoval, CategoryRepository};
pub use channel::{normalize_channel_name, Channel, ChannelRepository};
pub use server::{Server, ServerFilter, ServerRecord, ServerRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use channel::MockChannelRepository;
#[cfg(test)]
pub use server::MockServerRepository;
