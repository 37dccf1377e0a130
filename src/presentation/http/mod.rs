//! HTTP Layer
//!
//! Routes, handlers and request body parsing.

pub mod handlers;
pub mod multipart;
pub mod routes;

pub use routes::create_router;
