//! Article models
//!
//! An article is written by exactly one user (`users -> wrote -> articles`)
//! and links to any number of tags and categories. Relationship ids are
//! exposed as sets: the store keeps no ordering among edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Full article projection with resolved relationships
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,

    /// Id of the user holding the `wrote` edge, if any
    pub author_id: Option<String>,

    pub tags: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

/// Minimal projection used to populate pickers (id + title)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
}

/// Listing row carrying the author's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleListing {
    pub id: String,
    pub title: String,
    pub text: String,
    pub author_name: Option<String>,
}

/// Input for creating an article
///
/// Tag and category ids that do not resolve to an existing record are
/// skipped without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub text: String,
    pub author_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            author_id: author_id.into(),
            tag_ids: Vec::new(),
            category_ids: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_ids = tag_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, category_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids = category_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Article update
///
/// `title` and `text` are merged only when supplied. The relationships are
/// always replaced: the current author, tag and category edges are dropped
/// and rebuilt from `author_id`, `tag_ids` and `category_ids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub author_id: String,

    #[serde(default)]
    pub tag_ids: Vec<String>,

    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl ArticleUpdate {
    /// Rewire relationships without touching title or text
    pub fn relationships(author_id: impl Into<String>) -> Self {
        Self {
            title: None,
            text: None,
            author_id: author_id.into(),
            tag_ids: Vec::new(),
            category_ids: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_ids = tag_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, category_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids = category_ids.into_iter().map(Into::into).collect();
        self
    }
}
