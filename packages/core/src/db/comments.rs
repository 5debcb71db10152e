//! Comment operations

use super::blog_repository::{
    new_uid, parse_timestamp, timestamp_now, BlogRepository, NoBindings, UidBindings,
};
use super::error::RepositoryError;
use super::schema::COMMENTS;
use crate::models::{Comment, CommentListing, CommentUpdate, NewComment};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use tracing::{debug, instrument};

const CREATE_COMMENT: &str = "
    BEGIN TRANSACTION;
    LET $comment = type::thing('comments', $uid);
    CREATE $comment CONTENT {
        uid: $uid,
        text: $text,
        created_at: $created_at
    };
    LET $authors = (SELECT VALUE id FROM users WHERE uid = $author_uid);
    RELATE $authors->wrote->$comment;
    LET $articles = (SELECT VALUE id FROM articles WHERE uid = $article_uid);
    RELATE $comment->on_article->$articles;
    COMMIT TRANSACTION;
";

const UPDATE_COMMENT: &str = "
    BEGIN TRANSACTION;
    LET $comment = (SELECT VALUE id FROM comments WHERE uid = $uid);
    UPDATE $comment MERGE $props;
    DELETE on_article WHERE in INSIDE $comment;
    DELETE wrote WHERE out INSIDE $comment;
    LET $authors = (SELECT VALUE id FROM users WHERE uid = $author_uid);
    RELATE $authors->wrote->$comment;
    LET $articles = (SELECT VALUE id FROM articles WHERE uid = $article_uid);
    RELATE $comment->on_article->$articles;
    COMMIT TRANSACTION;
";

const LISTING_FIELDS: &str = "
    uid,
    text,
    array::first(<-wrote<-users.uid) AS author_uid,
    array::first(<-wrote<-users.name) AS author_name,
    array::first(->on_article->articles.uid) AS article_uid,
    array::first(->on_article->articles.title) AS article_title
";

#[derive(Debug, Deserialize)]
struct CommentRow {
    uid: String,
    text: String,
    created_at: String,
    #[serde(default)]
    author_uid: Option<String>,
    #[serde(default)]
    article_uid: Option<String>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.uid,
            text: row.text,
            created_at: parse_timestamp(&row.created_at),
            author_id: row.author_uid,
            article_id: row.article_uid,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommentListingRow {
    uid: String,
    text: String,
    #[serde(default)]
    author_uid: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    article_uid: Option<String>,
    #[serde(default)]
    article_title: Option<String>,
}

impl From<CommentListingRow> for CommentListing {
    fn from(row: CommentListingRow) -> Self {
        CommentListing {
            id: row.uid,
            text: row.text,
            author_id: row.author_uid,
            author_name: row.author_name,
            article_id: row.article_uid,
            article_title: row.article_title,
        }
    }
}

#[derive(Serialize)]
struct CreateCommentBindings {
    uid: String,
    text: String,
    created_at: String,
    author_uid: String,
    article_uid: String,
}

#[derive(Serialize)]
struct CommentProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct UpdateCommentBindings {
    uid: String,
    props: CommentProperties,
    author_uid: String,
    article_uid: String,
}

#[derive(Serialize)]
struct ArticleBindings {
    article_uid: String,
}

impl<C> BlogRepository<C>
where
    C: Connection,
{
    /// Create a comment by `comment.author_id` on `comment.article_id`
    #[instrument(skip(self, comment), fields(article_id = %comment.article_id, author_id = %comment.author_id))]
    pub async fn create_comment(&self, comment: NewComment) -> Result<String, RepositoryError> {
        let uid = new_uid();

        self.execute(
            CREATE_COMMENT,
            CreateCommentBindings {
                uid: uid.clone(),
                text: comment.text,
                created_at: timestamp_now(),
                author_uid: comment.author_id,
                article_uid: comment.article_id,
            },
            "creating comment",
        )
        .await?;

        debug!("Created comment {}", uid);
        Ok(uid)
    }

    /// Every comment with author and article display fields, in no
    /// particular order
    #[instrument(skip(self))]
    pub async fn list_comments(&self) -> Result<Vec<CommentListing>, RepositoryError> {
        let rows: Vec<CommentListingRow> = self
            .fetch(
                format!("SELECT {} FROM comments;", LISTING_FIELDS),
                NoBindings {},
                "listing comments",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Comments whose `on_article` edge points at the article, in no
    /// particular order
    #[instrument(skip(self))]
    pub async fn list_article_comments(
        &self,
        article_id: &str,
    ) -> Result<Vec<CommentListing>, RepositoryError> {
        let rows: Vec<CommentListingRow> = self
            .fetch(
                format!(
                    "SELECT {} FROM comments WHERE ->on_article->articles.uid CONTAINS $article_uid;",
                    LISTING_FIELDS
                ),
                ArticleBindings {
                    article_uid: article_id.to_string(),
                },
                "listing article comments",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_comment(&self, id: &str) -> Result<Option<Comment>, RepositoryError> {
        let rows: Vec<CommentRow> = self
            .fetch(
                "SELECT
                    uid,
                    text,
                    created_at,
                    array::first(<-wrote<-users.uid) AS author_uid,
                    array::first(->on_article->articles.uid) AS article_uid
                FROM comments WHERE uid = $uid LIMIT 1;",
                UidBindings::new(id),
                "fetching comment",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).next())
    }

    /// Merge text and move the comment to the supplied author and article
    ///
    /// Both edges are dropped and recreated, so the comment belongs to exactly
    /// one article afterwards (or none if `article_id` does not resolve).
    #[instrument(skip(self, update), fields(article_id = %update.article_id, author_id = %update.author_id))]
    pub async fn update_comment(&self, id: &str, update: CommentUpdate) -> Result<(), RepositoryError> {
        self.execute(
            UPDATE_COMMENT,
            UpdateCommentBindings {
                uid: id.to_string(),
                props: CommentProperties { text: update.text },
                author_uid: update.author_id,
                article_uid: update.article_id,
            },
            "updating comment",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: &str) -> Result<(), RepositoryError> {
        self.detach_delete(COMMENTS, id, "deleting comment").await
    }
}
