//! # Server Directory Library
//!
//! This crate provides the directory API of a chat platform:
//! - Listing servers by category, membership and size
//! - Managing categories, servers, memberships and channels
//! - Storing category icons and channel banners and icons
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits and upload rules
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, media storage and metrics implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! server_directory/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, upload rules
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, storage and metrics implementations
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
