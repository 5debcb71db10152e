//! Database Layer
//!
//! The graph repository and everything it needs to talk to SurrealDB:
//!
//! - Connection and schema initialization (`BlogRepository::connect`)
//! - Node tables `users`, `articles`, `tags`, `categories`, `comments`
//! - Relation tables `wrote`, `has_tag`, `in_category`, `on_article`
//! - Unique indexes on `users.email` and every `uid`
//!
//! Entity operations are split across `users`, `articles`, `taxonomy` and
//! `comments`, each adding methods to [`BlogRepository`].

mod articles;
mod blog_repository;
mod comments;
mod error;
pub mod schema;
mod taxonomy;
mod users;

pub use blog_repository::BlogRepository;
pub use error::RepositoryError;
