//! Comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full comment projection
///
/// `author_id` and `article_id` are `None` only when the ids supplied on the
/// last create/update did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<String>,
    pub article_id: Option<String>,
}

/// Listing row with author and article display fields resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentListing {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub article_id: Option<String>,
    pub article_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub article_id: String,
    pub author_id: String,
    pub text: String,
}

impl NewComment {
    pub fn new(
        article_id: impl Into<String>,
        author_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            article_id: article_id.into(),
            author_id: author_id.into(),
            text: text.into(),
        }
    }
}

/// Comment update: text merged when supplied, both edges always rebuilt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub author_id: String,
    pub article_id: String,
}

impl CommentUpdate {
    pub fn new(author_id: impl Into<String>, article_id: impl Into<String>) -> Self {
        Self {
            text: None,
            author_id: author_id.into(),
            article_id: article_id.into(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
