//! Tag and category operations
//!
//! Both tables hold `{ uid, name, url }` nodes. Deleting one detaches it from
//! every article; the articles themselves are untouched.

use super::blog_repository::{new_uid, BlogRepository, NoBindings, UidBindings};
use super::error::RepositoryError;
use super::schema::{CATEGORIES, TAGS};
use crate::models::{Category, NewCategory, NewTag, Tag, TaxonomyUpdate};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct TaxonomyRow {
    uid: String,
    name: String,
    url: String,
}

impl From<TaxonomyRow> for Tag {
    fn from(row: TaxonomyRow) -> Self {
        Tag {
            id: row.uid,
            name: row.name,
            url: row.url,
        }
    }
}

impl From<TaxonomyRow> for Category {
    fn from(row: TaxonomyRow) -> Self {
        Category {
            id: row.uid,
            name: row.name,
            url: row.url,
        }
    }
}

#[derive(Serialize)]
struct CreateTaxonomyBindings {
    table: &'static str,
    uid: String,
    name: String,
    url: String,
}

impl<C> BlogRepository<C>
where
    C: Connection,
{
    async fn create_taxonomy(
        &self,
        table: &'static str,
        name: String,
        url: String,
        context: &str,
    ) -> Result<String, RepositoryError> {
        let uid = new_uid();

        self.execute(
            "CREATE type::thing($table, $uid) CONTENT { uid: $uid, name: $name, url: $url };",
            CreateTaxonomyBindings {
                table,
                uid: uid.clone(),
                name,
                url,
            },
            context,
        )
        .await?;

        debug!("Created {} {}", table, uid);
        Ok(uid)
    }

    async fn list_taxonomy(
        &self,
        table: &'static str,
        context: &str,
    ) -> Result<Vec<TaxonomyRow>, RepositoryError> {
        self.fetch(
            format!("SELECT uid, name, url FROM {};", table),
            NoBindings {},
            context,
        )
        .await
    }

    async fn get_taxonomy(
        &self,
        table: &'static str,
        uid: &str,
        context: &str,
    ) -> Result<Option<TaxonomyRow>, RepositoryError> {
        let rows: Vec<TaxonomyRow> = self
            .fetch(
                format!("SELECT uid, name, url FROM {} WHERE uid = $uid LIMIT 1;", table),
                UidBindings::new(uid),
                context,
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, tag), fields(name = %tag.name))]
    pub async fn create_tag(&self, tag: NewTag) -> Result<String, RepositoryError> {
        self.create_taxonomy(TAGS, tag.name, tag.url, "creating tag")
            .await
    }

    /// All tags, in no particular order
    #[instrument(skip(self))]
    pub async fn list_tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let rows = self.list_taxonomy(TAGS, "listing tags").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tag(&self, id: &str) -> Result<Option<Tag>, RepositoryError> {
        let row = self.get_taxonomy(TAGS, id, "fetching tag").await?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, update))]
    pub async fn update_tag(&self, id: &str, update: TaxonomyUpdate) -> Result<(), RepositoryError> {
        self.merge_properties(TAGS, id, update, "updating tag").await
    }

    /// Delete a tag; articles keep their other tags
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: &str) -> Result<(), RepositoryError> {
        self.detach_delete(TAGS, id, "deleting tag").await
    }

    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(&self, category: NewCategory) -> Result<String, RepositoryError> {
        self.create_taxonomy(CATEGORIES, category.name, category.url, "creating category")
            .await
    }

    /// All categories, in no particular order
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = self.list_taxonomy(CATEGORIES, "listing categories").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, RepositoryError> {
        let row = self.get_taxonomy(CATEGORIES, id, "fetching category").await?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, update))]
    pub async fn update_category(
        &self,
        id: &str,
        update: TaxonomyUpdate,
    ) -> Result<(), RepositoryError> {
        self.merge_properties(CATEGORIES, id, update, "updating category")
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> Result<(), RepositoryError> {
        self.detach_delete(CATEGORIES, id, "deleting category")
            .await
    }
}
