#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::constants::{DEFAULT_COLLECTION, DEFAULT_DB, DEFAULT_MONGO_URL, DEFAULT_TIMEOUT_SECS};

/// Where the graded collection lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct GraderConfig {
    /// MongoDB connection string.
    #[builder(default = DEFAULT_MONGO_URL.to_string())]
    uri:        String,
    /// Database holding the collection.
    #[builder(default = DEFAULT_DB.to_string())]
    database:   String,
    /// Collection to grade.
    #[builder(default = DEFAULT_COLLECTION.to_string())]
    collection: String,
    /// Server selection and connect timeout.
    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    timeout:    Duration,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GraderConfig {
    /// Reads `DOCGRADE_MONGO_URL`, `DOCGRADE_DB`, `DOCGRADE_COLLECTION` and
    /// `DOCGRADE_TIMEOUT_SECS`, falling back to the lab defaults.
    pub fn from_env() -> Self {
        Self {
            uri:        read_string("DOCGRADE_MONGO_URL", DEFAULT_MONGO_URL),
            database:   read_string("DOCGRADE_DB", DEFAULT_DB),
            collection: read_string("DOCGRADE_COLLECTION", DEFAULT_COLLECTION),
            timeout:    parse_timeout_secs(std::env::var("DOCGRADE_TIMEOUT_SECS").ok()),
        }
    }

    /// Replaces any setting for which an override is given.
    pub fn with_overrides(
        mut self,
        uri: Option<String>,
        database: Option<String>,
        collection: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(uri) = uri {
            self.uri = uri;
        }
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(collection) = collection {
            self.collection = collection;
        }
        if let Some(secs) = timeout_secs.filter(|secs| *secs > 0) {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Returns the connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the server selection and connect timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Reads a non-blank environment variable, trimmed, or returns `default`.
fn read_string(env: &str, default: &str) -> String {
    std::env::var(env)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a timeout in whole seconds; zero or garbage means the default.
fn parse_timeout_secs(value: Option<String>) -> Duration {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}
