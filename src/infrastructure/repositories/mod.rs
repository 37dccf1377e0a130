//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! - **PgCategoryRepository** - categories, with cascading delete
//! - **PgServerRepository** - servers, membership and the directory listing query
//! - **PgChannelRepository** - channels, lower-casing names on write
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use server_directory::infrastructure::repositories::{
//!     PgCategoryRepository, PgChannelRepository, PgServerRepository,
//! };
//!
//! fn setup_repositories(pool: PgPool) {
//!     let categories = PgCategoryRepository::new(pool.clone());
//!     let servers = PgServerRepository::new(pool.clone());
//!     let channels = PgChannelRepository::new(pool);
//! }
//! ```

pub mod category_repository;
pub mod channel_repository;
pub mod server_repository;

pub use category_repository::PgCategoryRepository;
pub use channel_repository::PgChannelRepository;
pub use server_repository::PgServerRepository;
