/// MongoDB storage backend using the official MongoDB async driver.
///
/// Provides [`MongoStore`], a [`DocumentStore`] backed by a
/// `mongodb::Database`, one collection per resource.
///
/// # Serialization strategy
///
/// Documents cross the store boundary as JSON objects. They are converted to
/// BSON on the way in and back to relaxed extended JSON on the way out. The
/// server-assigned `_id` is an `ObjectId` in the database and its hex string
/// everywhere else.

use super::query::{Filter, Sort, SortOrder};
use super::store::{Document, DocumentStore, StoreError, ID_FIELD};
use crate::id::RecordId;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::debug;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Converts a JSON document into BSON for writing
///
/// Any `_id` is dropped; the server assigns identifiers.
fn to_bson_document(mut document: Document) -> Result<BsonDocument, StoreError> {
    document.remove(ID_FIELD);

    match bson::to_bson(&serde_json::Value::Object(document))
        .map_err(|e| StoreError::Serialization(format!("Failed to convert JSON to BSON: {}", e)))?
    {
        Bson::Document(d) => Ok(d),
        other => Err(StoreError::Serialization(format!(
            "Expected BSON document, got {:?}",
            other.element_type()
        ))),
    }
}

/// Converts a stored BSON document back into JSON, rendering `_id` as hex
fn from_bson_document(mut document: BsonDocument) -> Document {
    if let Ok(oid) = document.get_object_id(ID_FIELD) {
        document.insert(ID_FIELD, Bson::String(oid.to_hex()));
    }

    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// Translates a [`Filter`] into a MongoDB query document
pub(crate) fn filter_to_bson(filter: &Filter) -> Result<BsonDocument, StoreError> {
    Ok(match filter {
        Filter::All => BsonDocument::new(),
        Filter::Id(id) => doc! { ID_FIELD: id.as_object_id() },
        Filter::Equals { field, value } => {
            let value = bson::to_bson(value)
                .map_err(|e| StoreError::InvalidQuery(format!("{}: {}", field, e)))?;
            doc! { field.as_str(): value }
        }
        Filter::Text { field, value, mode } => {
            doc! { field.as_str(): { "$regex": mode.pattern(value), "$options": "i" } }
        }
        Filter::And(filters) => {
            let clauses = filters
                .iter()
                .map(filter_to_bson)
                .collect::<Result<Vec<_>, _>>()?;
            doc! { "$and": clauses }
        }
    })
}

pub(crate) fn sort_to_bson(sort: &Sort) -> BsonDocument {
    let direction = match sort.order {
        SortOrder::Ascending => 1,
        SortOrder::Descending => -1,
    };
    doc! { sort.field.as_str(): direction }
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Document store backed by MongoDB
///
/// # Example
///
/// ```rust,ignore
/// use hunt_shared::db::client::{create_database, DatabaseConfig};
/// use hunt_shared::db::mongo::MongoStore;
///
/// let db = create_database(DatabaseConfig::default()).await?;
/// let store = MongoStore::new(db);
/// store.ping().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Creates a store over an already connected database handle
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Gets a reference to the underlying database
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &Sort,
    ) -> Result<Vec<Document>, StoreError> {
        let query = filter_to_bson(filter)?;
        debug!(collection, ?query, "find");

        let cursor = self
            .collection(collection)
            .find(query)
            .sort(sort_to_bson(sort))
            .await?;

        let docs: Vec<BsonDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(from_bson_document).collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, StoreError> {
        let doc = self
            .collection(collection)
            .find_one(filter_to_bson(&Filter::Id(id))?)
            .await?;
        Ok(doc.map(from_bson_document))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<RecordId, StoreError> {
        let result = self
            .collection(collection)
            .insert_one(to_bson_document(document)?)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(RecordId::from_object_id)
            .ok_or_else(|| StoreError::Serialization("Inserted _id was not an ObjectId".to_string()))
    }

    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter_to_bson(&Filter::Id(id))?)
            .await?;
        Ok(result.deleted_count)
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<Option<Document>, StoreError> {
        let update = doc! { "$set": to_bson_document(fields)? };

        let doc = self
            .collection(collection)
            .find_one_and_update(filter_to_bson(&Filter::Id(id))?, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(doc.map(from_bson_document))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
