//! Repository Error Types
//!
//! Errors surfaced by the graph repository. Store errors pass through
//! unmodified as the `source`; the only translation is singling out unique
//! index violations so callers can react to duplicates.
//!
//! Missing records are not errors: lookups return `Ok(None)`.

use surrealdb::error::Db;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Failed to reach or authenticate against the store
    #[error("Failed to connect to graph store at {uri}: {source}")]
    ConnectionFailed {
        uri: String,
        source: surrealdb::Error,
    },

    /// Failed to define tables, edges or unique indexes
    #[error("Failed to initialize graph schema: {0}")]
    InitializationFailed(String),

    /// A unique index rejected the write (duplicate email or id)
    #[error("Constraint violation while {context}: {source}")]
    ConstraintViolation {
        context: String,
        source: surrealdb::Error,
    },

    /// Any other store failure: lost connection, malformed query, decode error
    #[error("Query failed while {context}: {source}")]
    QueryFailed {
        context: String,
        source: surrealdb::Error,
    },
}

impl RepositoryError {
    pub fn connection_failed(uri: impl Into<String>, source: surrealdb::Error) -> Self {
        Self::ConnectionFailed {
            uri: uri.into(),
            source,
        }
    }

    pub fn initialization_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    pub fn query_failed(context: impl Into<String>, source: surrealdb::Error) -> Self {
        Self::QueryFailed {
            context: context.into(),
            source,
        }
    }

    /// Classify a store error, keeping unique index violations apart
    pub fn from_store(context: impl Into<String>, source: surrealdb::Error) -> Self {
        if is_constraint_violation(&source) {
            Self::ConstraintViolation {
                context: context.into(),
                source,
            }
        } else {
            Self::query_failed(context, source)
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

/// Whether a store error is a unique index or record id collision
///
/// Embedded engines report typed errors. Remote engines only carry the
/// server's message, so fall back to its wording.
pub(crate) fn is_constraint_violation(err: &surrealdb::Error) -> bool {
    match err {
        surrealdb::Error::Db(Db::IndexExists { .. } | Db::RecordExists { .. }) => true,
        other => {
            let message = other.to_string();
            message.contains("already contains") || message.contains("already exists")
        }
    }
}

/// Whether the error is the placeholder reported for statements skipped by a
/// failed transaction
pub(crate) fn is_transaction_cancelled(err: &surrealdb::Error) -> bool {
    err.to_string()
        .contains("not executed due to a failed transaction")
}
