//! Repository configuration
//!
//! Connection settings for the graph store. Values come from the process
//! environment with defaults suitable for local development; an embedded
//! in-memory store is used when no URI is given.
//!
//! # Environment Variables
//!
//! - `BLOG_DB_URI`: store address, e.g. `mem://`, `rocksdb:///var/lib/blog`,
//!   `http://127.0.0.1:8000` (default: `mem://`)
//! - `BLOG_DB_NS`: namespace (default: `blog`)
//! - `BLOG_DB_NAME`: database (default: `cms`)
//! - `BLOG_DB_USER` / `BLOG_DB_PASS`: root credentials, only used when both are set

use std::env;
use std::fmt;

pub const DEFAULT_URI: &str = "mem://";
pub const DEFAULT_NAMESPACE: &str = "blog";
pub const DEFAULT_DATABASE: &str = "cms";

/// Root credential pair for remote stores
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub uri: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<Credentials>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URI)
    }
}

impl RepositoryConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            credentials: None,
        }
    }

    /// Build config from `BLOG_DB_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (non_empty("BLOG_DB_USER"), non_empty("BLOG_DB_PASS")) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        Self {
            uri: non_empty("BLOG_DB_URI").unwrap_or_else(|| DEFAULT_URI.to_string()),
            namespace: non_empty("BLOG_DB_NS").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            database: non_empty("BLOG_DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            credentials,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self.database = database.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, RepositoryConfig::default());
        assert_eq!(config.uri, "mem://");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("BLOG_DB_URI", "http://127.0.0.1:8000"),
            ("BLOG_DB_NS", "site"),
            ("BLOG_DB_NAME", "prod"),
            ("BLOG_DB_USER", "root"),
            ("BLOG_DB_PASS", "secret"),
        ]));

        assert_eq!(config.uri, "http://127.0.0.1:8000");
        assert_eq!(config.namespace, "site");
        assert_eq!(config.database, "prod");
        assert_eq!(
            config.credentials,
            Some(Credentials {
                username: "root".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[("BLOG_DB_USER", "root")]));
        assert!(config.credentials.is_none());

        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("BLOG_DB_USER", "root"),
            ("BLOG_DB_PASS", "  "),
        ]));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RepositoryConfig::default().with_credentials("root", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("root"));
        assert!(!rendered.contains("hunter2"));
    }
}
