/// Document store abstraction
///
/// Models talk to persistence only through [`DocumentStore`]: find, find by
/// id, insert, delete, and an atomic field update. Documents cross the trait
/// boundary as JSON objects whose `_id` (when present) is the hex form of a
/// [`RecordId`].
///
/// Two backends are provided:
///
/// - [`MongoStore`](super::mongo::MongoStore): MongoDB via the official driver
/// - [`InMemoryStore`](super::memory::InMemoryStore): process-local, for tests
///   and development
///
/// The store handle is built once at startup and passed in explicitly
/// (`Arc<dyn DocumentStore>`), so tests can swap in the in-memory backend.

use super::query::{Filter, Sort};
use crate::id::RecordId;
use async_trait::async_trait;
use thiserror::Error;

/// A stored document as a JSON object
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Name of the identifier field in every stored document
pub const ID_FIELD: &str = "_id";

/// Store errors
///
/// None of these are expected during normal operation; they surface to
/// clients as generic server errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend driver error (connection, command, timeout)
    #[error("Database error: {0}")]
    Database(String),

    /// Document could not be converted to or from its stored form
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filter could not be translated for this backend
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// In-memory backend lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Narrow persistence interface used by the models
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` matching `filter`, ordered by `sort`
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &Sort,
    ) -> Result<Vec<Document>, StoreError>;

    /// Returns the document with identifier `id`, if any
    async fn find_one(&self, collection: &str, id: RecordId)
        -> Result<Option<Document>, StoreError>;

    /// Inserts `document` and returns the identifier the store assigned
    ///
    /// Any `_id` already present in `document` is ignored.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<RecordId, StoreError>;

    /// Deletes the document with identifier `id`
    ///
    /// Returns the number of documents removed (0 or 1).
    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, StoreError>;

    /// Atomically sets `fields` on the document with identifier `id`
    ///
    /// Returns the updated document, or `None` when no document matched.
    async fn set_fields(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
