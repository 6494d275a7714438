#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use futures::TryStreamExt;
use mongodb::{
    Client,
    bson::{Bson, Document, doc},
    options::ClientOptions,
};

use crate::{
    config::GraderConfig,
    constants::APP_NAME,
    types::{Record, type_name},
};

/// Reasons the graded collection could not be read.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("Invalid connection string `{uri}`: {source}")]
    InvalidUri {
        /// The connection string as given.
        uri:    String,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
    /// A client could not be created from the parsed options.
    #[error("Could not create a client: {0}")]
    Connect(#[source] mongodb::error::Error),
    /// The server could not be reached or the find failed.
    #[error("Could not read `{namespace}`: {source}")]
    Query {
        /// `database.collection` that was being read.
        namespace: String,
        /// Driver error.
        #[source]
        source:    mongodb::error::Error,
    },
    /// An export file could not be read.
    #[error("Could not read `{}`: {source}", path.display())]
    Io {
        /// Path of the export file.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An export file is not valid JSON.
    #[error("`{}` is not valid JSON: {source}", path.display())]
    Json {
        /// Path of the export file.
        path:   PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// An exported value is not a document, or not valid Extended JSON.
    #[error("Entry {index} of `{}` is not a document: {reason}", path.display())]
    NotADocument {
        /// Path of the export file.
        path:   PathBuf,
        /// Zero-based position of the entry.
        index:  usize,
        /// What was found instead.
        reason: String,
    },
}

/// Anything that can hand over every document of the graded collection.
pub trait RecordSource {
    /// Human readable description of where records come from.
    fn describe(&self) -> String;

    /// Reads the whole collection into memory.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Record>, StoreError>> + Send;
}

/// Reads records from a live MongoDB deployment.
#[derive(Debug, Clone)]
pub struct MongoSource {
    /// Connection string.
    uri:        String,
    /// Database name.
    database:   String,
    /// Collection name.
    collection: String,
    /// Server selection and connect timeout.
    timeout:    Duration,
}

impl MongoSource {
    /// Creates a source for the collection named by `config`.
    pub fn new(config: &GraderConfig) -> Self {
        Self {
            uri:        config.uri().to_string(),
            database:   config.database().to_string(),
            collection: config.collection().to_string(),
            timeout:    config.timeout(),
        }
    }

    /// `database.collection`, as the server spells it.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    /// Parses the connection string and applies the configured timeouts.
    async fn client(&self) -> Result<Client, StoreError> {
        let mut options =
            ClientOptions::parse(self.uri.as_str())
                .await
                .map_err(|source| StoreError::InvalidUri {
                    uri: self.uri.clone(),
                    source,
                })?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);

        Client::with_options(options).map_err(StoreError::Connect)
    }
}

impl RecordSource for MongoSource {
    fn describe(&self) -> String {
        format!("{} at {}", self.namespace(), self.uri)
    }

    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let client = self.client().await?;
        let query_error = |source| StoreError::Query {
            namespace: self.namespace(),
            source,
        };

        tracing::debug!("Reading every document of {}", self.namespace());
        let documents: Vec<Document> = client
            .database(&self.database)
            .collection::<Document>(&self.collection)
            .find(doc! {})
            .await
            .map_err(query_error)?
            .try_collect()
            .await
            .map_err(query_error)?;

        Ok(documents.iter().map(Record::from_document).collect())
    }
}

/// Reads records from a `mongoexport` dump.
///
/// Both `--jsonArray` output and the default one-document-per-line output are
/// accepted, in relaxed or canonical Extended JSON.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    /// Path of the export file.
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses export text into records.
    pub fn parse(&self, contents: &str) -> Result<Vec<Record>, StoreError> {
        let values = serde_json::Deserializer::from_str(contents)
            .into_iter::<serde_json::Value>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let entries = match <[_; 1]>::try_from(values) {
            Ok([serde_json::Value::Array(items)]) => items,
            Ok([single]) => vec![single],
            Err(values) => values,
        };

        entries
            .into_iter()
            .enumerate()
            .map(|(index, value)| self.to_record(index, value))
            .collect()
    }

    /// Converts one exported entry into a record.
    fn to_record(&self, index: usize, value: serde_json::Value) -> Result<Record, StoreError> {
        let not_a_document = |reason: String| StoreError::NotADocument {
            path: self.path.clone(),
            index,
            reason,
        };

        match Bson::try_from(value).map_err(|e| not_a_document(e.to_string()))? {
            Bson::Document(doc) => Ok(Record::from_document(&doc)),
            other => Err(not_a_document(format!("found {}", type_name(&other)))),
        }
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| StoreError::Io {
                    path: self.path.clone(),
                    source,
                })?;

        self.parse(&contents)
    }
}

/// Hands out a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Records returned by every fetch.
    records: Vec<Record>,
}

impl MemorySource {
    /// Creates a source that always returns `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }

    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.clone())
    }
}
