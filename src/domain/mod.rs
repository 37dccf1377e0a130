//! # Domain Layer
//!
//! The domain layer contains the core business rules of the directory.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Category, Server, Channel and their repository traits
//! - **services**: media validation and the file storage collaborator
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
