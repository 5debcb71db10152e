//! BlogRepository - Graph Repository for the Blog CMS
//!
//! The repository is the sole owner of persistent state. It translates entity
//! operations (users, articles, tags, categories, comments) into SurrealQL
//! statements against a graph store where relationships are edge records in
//! relation tables (`wrote`, `has_tag`, `in_category`, `on_article`).
//!
//! # Design Principles
//!
//! 1. **One round trip per operation**: multi-statement bodies run inside a
//!    single `BEGIN TRANSACTION` / `COMMIT TRANSACTION` query
//! 2. **Full-replace rewiring**: updates drop every relationship edge of the
//!    entity and recreate them from the supplied ids
//! 3. **Lenient foreign ids**: ids that resolve to nothing produce no edge
//!    and no error
//! 4. **Explicit handle**: no process-wide instance; construct with
//!    [`BlogRepository::connect`] or [`BlogRepository::new`], shut down with
//!    [`BlogRepository::close`]
//!
//! Entity operations live in sibling modules (`users`, `articles`,
//! `taxonomy`, `comments`) as further `impl` blocks on this type.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blog_graph_core::config::RepositoryConfig;
//! use blog_graph_core::db::BlogRepository;
//! use blog_graph_core::models::NewUser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = BlogRepository::connect(&RepositoryConfig::new("mem://")).await?;
//!     let id = repo.create_user(NewUser::new("Ada", "ada@example.com")).await?;
//!     assert!(repo.get_user(&id).await?.is_some());
//!     repo.close();
//!     Ok(())
//! }
//! ```

use super::error::{is_constraint_violation, is_transaction_cancelled, RepositoryError};
use super::schema::{self, EDGE_TABLES};
use crate::config::RepositoryConfig;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Response, Surreal};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Graph repository handle
///
/// Cheap to clone; clones share the underlying connection. Operations are
/// independent store transactions and may be called concurrently.
pub struct BlogRepository<C = Any>
where
    C: Connection,
{
    pub(crate) db: Arc<Surreal<C>>,
}

impl<C> Clone for BlogRepository<C>
where
    C: Connection,
{
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl BlogRepository<Any> {
    /// Connect to the store described by `config` and initialize the schema
    ///
    /// The URI scheme picks the engine (`mem://`, `rocksdb://`, `http://`,
    /// `ws://`). Root credentials are only presented when configured.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if the store is unreachable, rejects the
    /// credentials, or refuses the namespace/database selection, and
    /// `InitializationFailed` if the schema cannot be defined.
    #[instrument(skip(config), fields(uri = %config.uri))]
    pub async fn connect(config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        info!(
            "Connecting to graph store (ns={}, db={})",
            config.namespace, config.database
        );

        let db = any::connect(config.uri.as_str())
            .await
            .map_err(|e| RepositoryError::connection_failed(&config.uri, e))?;

        if let Some(credentials) = &config.credentials {
            db.signin(Root {
                username: &credentials.username,
                password: &credentials.password,
            })
            .await
            .map_err(|e| RepositoryError::connection_failed(&config.uri, e))?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|e| RepositoryError::connection_failed(&config.uri, e))?;

        Self::new(db).await
    }
}

impl<C> BlogRepository<C>
where
    C: Connection,
{
    /// Wrap an already connected handle and initialize the schema
    ///
    /// The handle must have a namespace and database selected.
    pub async fn new(db: Surreal<C>) -> Result<Self, RepositoryError> {
        schema::initialize(&db).await?;
        info!("Graph repository ready");

        Ok(Self { db: Arc::new(db) })
    }

    /// Direct access to the underlying store handle
    ///
    /// Useful for inspecting edges in tests or running ad-hoc queries
    pub fn db(&self) -> &Surreal<C> {
        &self.db
    }

    /// Release this handle
    ///
    /// The connection closes once the last clone is dropped.
    pub fn close(self) {
        info!(
            "Closing graph repository handle ({} other handles remain)",
            Arc::strong_count(&self.db) - 1
        );
    }

    /// Run a query that returns no rows of interest
    pub(crate) async fn execute(
        &self,
        query: impl Into<String>,
        bindings: impl Serialize + 'static,
        context: &str,
    ) -> Result<(), RepositoryError> {
        let response = self
            .db
            .query(query.into())
            .bind(bindings)
            .await
            .map_err(|e| RepositoryError::from_store(context, e))?;

        checked(response, context)?;
        Ok(())
    }

    /// Run a single-statement query and decode its rows
    pub(crate) async fn fetch<T>(
        &self,
        query: impl Into<String>,
        bindings: impl Serialize + 'static,
        context: &str,
    ) -> Result<Vec<T>, RepositoryError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .db
            .query(query.into())
            .bind(bindings)
            .await
            .map_err(|e| RepositoryError::from_store(context, e))?;

        let mut response = checked(response, context)?;
        response
            .take(0)
            .map_err(|e| RepositoryError::query_failed(context, e))
    }

    /// Merge a partial property map onto the node with the given uid
    ///
    /// Absent nodes are left alone; `UPDATE` never creates records here.
    pub(crate) async fn merge_properties(
        &self,
        table: &'static str,
        uid: &str,
        properties: impl Serialize + 'static,
        context: &str,
    ) -> Result<(), RepositoryError> {
        self.execute(
            "UPDATE type::table($table) MERGE $props WHERE uid = $uid;",
            MergeBindings {
                table,
                uid: uid.to_string(),
                props: properties,
            },
            context,
        )
        .await
    }

    /// Remove a node together with every edge touching it
    pub(crate) async fn detach_delete(
        &self,
        table: &'static str,
        uid: &str,
        context: &str,
    ) -> Result<(), RepositoryError> {
        let query = format!(
            "BEGIN TRANSACTION;\n\
             LET $node = (SELECT VALUE id FROM type::table($table) WHERE uid = $uid);\n\
             {}\
             DELETE $node;\n\
             COMMIT TRANSACTION;",
            detach_statements("$node")
        );

        debug!("Detach-deleting {} {}", table, uid);
        self.execute(
            query,
            TableBindings {
                table,
                uid: uid.to_string(),
            },
            context,
        )
        .await
    }
}

#[derive(Serialize)]
struct MergeBindings<P> {
    table: &'static str,
    uid: String,
    props: P,
}

#[derive(Serialize)]
struct TableBindings {
    table: &'static str,
    uid: String,
}

/// Empty binding set for parameterless queries
#[derive(Serialize)]
pub(crate) struct NoBindings {}

/// Bindings carrying only a uid
#[derive(Serialize)]
pub(crate) struct UidBindings {
    pub uid: String,
}

impl UidBindings {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
        }
    }
}

/// `DELETE` statements for every edge table touching the records in `var`
///
/// `var` must name a query variable holding an array of record ids.
pub(crate) fn detach_statements(var: &str) -> String {
    EDGE_TABLES
        .iter()
        .map(|edge| {
            format!(
                "DELETE {edge} WHERE in INSIDE {var} OR out INSIDE {var};\n",
                edge = edge,
                var = var
            )
        })
        .collect()
}

/// Surface statement errors held in a response
///
/// Statements skipped by a failed transaction report a generic placeholder;
/// the statement that actually failed is preferred, and a unique index
/// violation anywhere in the response wins.
pub(crate) fn checked(mut response: Response, context: &str) -> Result<Response, RepositoryError> {
    let mut errors: Vec<(usize, surrealdb::Error)> = response.take_errors().into_iter().collect();
    if errors.is_empty() {
        return Ok(response);
    }

    errors.sort_by_key(|(index, _)| *index);

    let position = errors
        .iter()
        .position(|(_, e)| is_constraint_violation(e))
        .or_else(|| errors.iter().position(|(_, e)| !is_transaction_cancelled(e)))
        .unwrap_or(0);

    let (index, source) = errors.swap_remove(position);
    debug!("Statement {} failed while {}: {}", index, context, source);
    Err(RepositoryError::from_store(context, source))
}

/// Fresh identifier for a new node
pub(crate) fn new_uid() -> String {
    Uuid::new_v4().to_string()
}

/// Creation timestamp as stored on nodes
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_statements_cover_every_edge_table() {
        let statements = detach_statements("$node");
        for edge in EDGE_TABLES {
            assert!(
                statements.contains(&format!("DELETE {} WHERE in INSIDE $node OR out INSIDE $node;", edge)),
                "missing detach for {}",
                edge
            );
        }
        assert_eq!(statements.lines().count(), EDGE_TABLES.len());
    }

    #[test]
    fn test_parse_timestamp_round_trips_rfc3339() {
        let now = Utc::now();
        let parsed = parse_timestamp(&now.to_rfc3339());
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_new_uid_is_uuid() {
        let uid = new_uid();
        assert!(Uuid::parse_str(&uid).is_ok());
        assert_ne!(uid, new_uid());
    }
}
