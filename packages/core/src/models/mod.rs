//! Data Models
//!
//! Plain data structures exchanged with the graph repository:
//!
//! - Full projections (`User`, `Article`, `Tag`, `Category`, `Comment`)
//! - Listing projections (`ArticleSummary`, `ArticleListing`, `CommentListing`)
//! - Create inputs (`New*`) and partial updates (`*Update`)
//!
//! Update structs skip `None` fields when serialized so they can be merged
//! onto stored records as partial property maps.

mod article;
mod comment;
mod taxonomy;
mod user;

#[cfg(test)]
mod update_test;

pub use article::{Article, ArticleListing, ArticleSummary, ArticleUpdate, NewArticle};
pub use comment::{Comment, CommentListing, CommentUpdate, NewComment};
pub use taxonomy::{Category, NewCategory, NewTag, Tag, TaxonomyUpdate};
pub use user::{NewUser, User, UserUpdate};
