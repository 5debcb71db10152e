//! Graph schema
//!
//! Node tables, relation tables and the unique indexes that back the
//! repository's integrity guarantees. Every statement uses `IF NOT EXISTS`,
//! so initialization runs on each startup without touching existing data.

use super::error::RepositoryError;
use surrealdb::{Connection, Surreal};
use tracing::debug;

pub const USERS: &str = "users";
pub const ARTICLES: &str = "articles";
pub const TAGS: &str = "tags";
pub const CATEGORIES: &str = "categories";
pub const COMMENTS: &str = "comments";

/// `users -> wrote -> articles | comments`
pub const WROTE: &str = "wrote";
/// `articles -> has_tag -> tags`
pub const HAS_TAG: &str = "has_tag";
/// `articles -> in_category -> categories`
pub const IN_CATEGORY: &str = "in_category";
/// `comments -> on_article -> articles`
pub const ON_ARTICLE: &str = "on_article";

pub const NODE_TABLES: [&str; 5] = [USERS, ARTICLES, TAGS, CATEGORIES, COMMENTS];
pub const EDGE_TABLES: [&str; 4] = [WROTE, HAS_TAG, IN_CATEGORY, ON_ARTICLE];

/// Unique indexes as (index name, table, field)
const UNIQUE_INDEXES: [(&str, &str, &str); 6] = [
    ("user_email", USERS, "email"),
    ("user_uid", USERS, "uid"),
    ("article_uid", ARTICLES, "uid"),
    ("tag_uid", TAGS, "uid"),
    ("category_uid", CATEGORIES, "uid"),
    ("comment_uid", COMMENTS, "uid"),
];

/// Render the full schema definition as one SurrealQL script
pub(crate) fn definition_script() -> String {
    let mut script = String::new();

    for table in NODE_TABLES {
        script.push_str(&format!("DEFINE TABLE IF NOT EXISTS {} SCHEMALESS;\n", table));
    }

    for edge in EDGE_TABLES {
        script.push_str(&format!(
            "DEFINE TABLE IF NOT EXISTS {} SCHEMALESS TYPE RELATION;\n",
            edge
        ));
    }

    for (name, table, field) in UNIQUE_INDEXES {
        script.push_str(&format!(
            "DEFINE INDEX IF NOT EXISTS {} ON TABLE {} FIELDS {} UNIQUE;\n",
            name, table, field
        ));
    }

    script
}

/// Define tables, edges and unique indexes
pub(crate) async fn initialize<C>(db: &Surreal<C>) -> Result<(), RepositoryError>
where
    C: Connection,
{
    let response = db
        .query(definition_script())
        .await
        .map_err(|e| RepositoryError::initialization_failed(e.to_string()))?;

    response
        .check()
        .map_err(|e| RepositoryError::initialization_failed(e.to_string()))?;

    debug!(
        "Graph schema ready ({} node tables, {} edge tables, {} unique indexes)",
        NODE_TABLES.len(),
        EDGE_TABLES.len(),
        UNIQUE_INDEXES.len()
    );
    Ok(())
}
