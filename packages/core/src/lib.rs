//! Blog Graph Core
//!
//! Data access for a small blog CMS backed by a graph database. Users write
//! articles and comments, articles carry tags and categories, and every one
//! of those links is an edge in the store.
//!
//! # Modules
//!
//! - [`models`] - Entity projections, create inputs and partial updates
//! - [`db`] - The graph repository (`BlogRepository`) and its error type
//! - [`config`] - Store address, namespace and credentials

pub mod config;
pub mod db;
pub mod models;

// Re-export commonly used types
pub use config::RepositoryConfig;
pub use db::{BlogRepository, RepositoryError};
pub use models::*;
