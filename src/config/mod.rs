//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use server_directory::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Media is stored under {}", settings.media.root.display());
//! ```

mod settings;

pub use settings::*;
