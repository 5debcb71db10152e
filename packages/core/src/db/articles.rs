//! Article operations
//!
//! Articles carry three kinds of relationship: the incoming `wrote` edge from
//! their author and outgoing `has_tag` / `in_category` edges. Create links
//! whatever resolves; update drops all three kinds and rebuilds them.

use super::blog_repository::{
    new_uid, parse_timestamp, timestamp_now, BlogRepository, NoBindings, UidBindings,
};
use super::error::RepositoryError;
use super::schema::ARTICLES;
use crate::models::{Article, ArticleListing, ArticleSummary, ArticleUpdate, NewArticle};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use tracing::{debug, instrument};

const CREATE_ARTICLE: &str = "
    BEGIN TRANSACTION;
    LET $article = type::thing('articles', $uid);
    CREATE $article CONTENT {
        uid: $uid,
        title: $title,
        text: $text,
        created_at: $created_at
    };
    LET $authors = (SELECT VALUE id FROM users WHERE uid = $author_uid);
    RELATE $authors->wrote->$article;
    LET $tags = (SELECT VALUE id FROM tags WHERE uid INSIDE $tag_uids);
    RELATE $article->has_tag->$tags;
    LET $categories = (SELECT VALUE id FROM categories WHERE uid INSIDE $category_uids);
    RELATE $article->in_category->$categories;
    COMMIT TRANSACTION;
";

// The prior author edge goes before the new one is added, so an article
// never holds two `wrote` edges.
const UPDATE_ARTICLE: &str = "
    BEGIN TRANSACTION;
    LET $article = (SELECT VALUE id FROM articles WHERE uid = $uid);
    UPDATE $article MERGE $props;
    DELETE wrote WHERE out INSIDE $article;
    DELETE has_tag WHERE in INSIDE $article;
    DELETE in_category WHERE in INSIDE $article;
    LET $authors = (SELECT VALUE id FROM users WHERE uid = $author_uid);
    RELATE $authors->wrote->$article;
    LET $tags = (SELECT VALUE id FROM tags WHERE uid INSIDE $tag_uids);
    RELATE $article->has_tag->$tags;
    LET $categories = (SELECT VALUE id FROM categories WHERE uid INSIDE $category_uids);
    RELATE $article->in_category->$categories;
    COMMIT TRANSACTION;
";

const SELECT_ARTICLE: &str = "
    SELECT
        uid,
        title,
        text,
        created_at,
        array::first(<-wrote<-users.uid) AS author_uid,
        ->has_tag->tags.uid AS tag_uids,
        ->in_category->categories.uid AS category_uids
    FROM articles WHERE uid = $uid LIMIT 1;
";

#[derive(Debug, Deserialize)]
struct ArticleRow {
    uid: String,
    title: String,
    text: String,
    created_at: String,
    #[serde(default)]
    author_uid: Option<String>,
    #[serde(default)]
    tag_uids: Vec<String>,
    #[serde(default)]
    category_uids: Vec<String>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.uid,
            title: row.title,
            text: row.text,
            created_at: parse_timestamp(&row.created_at),
            author_id: row.author_uid,
            tags: row.tag_uids.into_iter().collect(),
            categories: row.category_uids.into_iter().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArticleSummaryRow {
    uid: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ArticleListingRow {
    uid: String,
    title: String,
    text: String,
    #[serde(default)]
    author_name: Option<String>,
}

#[derive(Serialize)]
struct CreateArticleBindings {
    uid: String,
    title: String,
    text: String,
    created_at: String,
    author_uid: String,
    tag_uids: Vec<String>,
    category_uids: Vec<String>,
}

/// Properties an article update may merge
#[derive(Serialize)]
struct ArticleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct UpdateArticleBindings {
    uid: String,
    props: ArticleProperties,
    author_uid: String,
    tag_uids: Vec<String>,
    category_uids: Vec<String>,
}

impl<C> BlogRepository<C>
where
    C: Connection,
{
    /// Create an article written by `article.author_id`
    ///
    /// The article is stored even when the author, tag or category ids do not
    /// resolve; those edges are simply not created.
    #[instrument(skip(self, article), fields(author_id = %article.author_id))]
    pub async fn create_article(&self, article: NewArticle) -> Result<String, RepositoryError> {
        let uid = new_uid();

        self.execute(
            CREATE_ARTICLE,
            CreateArticleBindings {
                uid: uid.clone(),
                title: article.title,
                text: article.text,
                created_at: timestamp_now(),
                author_uid: article.author_id,
                tag_uids: article.tag_ids,
                category_uids: article.category_ids,
            },
            "creating article",
        )
        .await?;

        debug!("Created article {}", uid);
        Ok(uid)
    }

    /// Id and title of every article, in no particular order
    #[instrument(skip(self))]
    pub async fn list_articles(&self) -> Result<Vec<ArticleSummary>, RepositoryError> {
        let rows: Vec<ArticleSummaryRow> = self
            .fetch(
                "SELECT uid, title FROM articles;",
                NoBindings {},
                "listing articles",
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ArticleSummary {
                id: row.uid,
                title: row.title,
            })
            .collect())
    }

    /// Every article with its author's name, in no particular order
    #[instrument(skip(self))]
    pub async fn list_articles_with_author(&self) -> Result<Vec<ArticleListing>, RepositoryError> {
        let rows: Vec<ArticleListingRow> = self
            .fetch(
                "SELECT uid, title, text, array::first(<-wrote<-users.name) AS author_name FROM articles;",
                NoBindings {},
                "listing articles with author",
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ArticleListing {
                id: row.uid,
                title: row.title,
                text: row.text,
                author_name: row.author_name,
            })
            .collect())
    }

    /// Article with its author id and tag/category id sets
    #[instrument(skip(self))]
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, RepositoryError> {
        let rows: Vec<ArticleRow> = self
            .fetch(SELECT_ARTICLE, UidBindings::new(id), "fetching article")
            .await?;
        Ok(rows.into_iter().map(Into::into).next())
    }

    /// Merge title/text and rebuild the author, tag and category edges
    ///
    /// This is a full replace: after the call the article's tags are exactly
    /// the resolvable ids in `update.tag_ids`, and likewise for categories.
    /// An unresolvable `author_id` leaves the article without an author.
    #[instrument(skip(self, update), fields(author_id = %update.author_id))]
    pub async fn update_article(&self, id: &str, update: ArticleUpdate) -> Result<(), RepositoryError> {
        self.execute(
            UPDATE_ARTICLE,
            UpdateArticleBindings {
                uid: id.to_string(),
                props: ArticleProperties {
                    title: update.title,
                    text: update.text,
                },
                author_uid: update.author_id,
                tag_uids: update.tag_ids,
                category_uids: update.category_ids,
            },
            "updating article",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_article(&self, id: &str) -> Result<(), RepositoryError> {
        self.detach_delete(ARTICLES, id, "deleting article").await
    }
}
