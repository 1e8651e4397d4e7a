/// Task model and store operations
///
/// A Task is one step of a Hunt. `huntId` groups tasks under a hunt but is
/// not checked against the `hunts` collection; a task may point at a hunt
/// that no longer exists.
///
/// Task listings are always ordered by `position` ascending, the sequence in
/// which a hunt's tasks are shown to players.
///
/// # Completion
///
/// `mark_done` flips `isDone` with a single atomic update. It never reads the
/// task first, so it cannot resurrect a task deleted concurrently.

use super::{from_document, parse_id, to_document};
use crate::db::query::{Filter, Sort};
use crate::db::store::{Document, DocumentStore};
use crate::error::{ModelError, ModelResult};
use crate::id::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};
use validator::Validate;

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// What the player has to do
    pub description: String,

    /// Ordering key within the hunt (>= 0)
    pub position: i64,

    /// Owning hunt
    pub hunt_id: String,

    /// Whether the task has been completed
    #[serde(default)]
    pub is_done: bool,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    #[validate(length(min = 1, message = "Task must have a non-empty description"))]
    pub description: String,

    #[serde(default)]
    #[validate(
        required(message = "Task must have a position"),
        range(min = 0, message = "Task position must be non-negative")
    )]
    pub position: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Task must belong to a hunt"))]
    pub hunt_id: String,

    /// Always false on create; only `mark_done` sets it
    #[serde(skip_deserializing)]
    pub is_done: bool,
}

impl NewTask {
    const RULE_ORDER: &'static [&'static str] = &["description", "position", "huntId"];
}

/// Recognized `GET /api/tasks` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQuery {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub position: Option<i64>,

    #[serde(rename = "huntId")]
    pub hunt_id: Option<String>,
}

impl TaskQuery {
    pub fn filter(&self) -> Filter {
        let mut filters = Vec::new();

        if let Some(position) = self.position {
            filters.push(Filter::equals("position", position));
        }
        if let Some(hunt_id) = super::non_empty(&self.hunt_id) {
            filters.push(Filter::equals("huntId", hunt_id));
        }

        Filter::all_of(filters)
    }

    /// Tasks are always listed in position order
    pub fn sort(&self) -> Sort {
        Sort::ascending("position")
    }
}

impl Task {
    /// Collection holding tasks
    pub const COLLECTION: &'static str = "tasks";

    /// Name used in client-facing error messages
    pub const RESOURCE: &'static str = "task";

    /// Validates and inserts a new task
    ///
    /// Rules are checked in order: `description`, `position`, `huntId`.
    pub async fn create(store: &dyn DocumentStore, data: NewTask) -> ModelResult<RecordId> {
        data.validate()
            .map_err(|e| ModelError::first_violation(&e, NewTask::RULE_ORDER))?;

        let id = store
            .insert_one(Self::COLLECTION, to_document(&data)?)
            .await?;

        info!(task_id = %id, hunt_id = %data.hunt_id, "Created task");
        Ok(id)
    }

    /// Finds a task by its client-supplied identifier
    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> ModelResult<Self> {
        let id = parse_id(Self::RESOURCE, id)?;

        let doc = store
            .find_one(Self::COLLECTION, id)
            .await?
            .ok_or(ModelError::NotFound {
                resource: Self::RESOURCE,
            })?;

        Ok(from_document(doc)?)
    }

    /// Lists tasks matching `query` in position order
    pub async fn list(store: &dyn DocumentStore, query: &TaskQuery) -> ModelResult<Vec<Self>> {
        let filter = query.filter();
        debug!(?filter, "Listing tasks");

        let docs = store.find(Self::COLLECTION, &filter, &query.sort()).await?;

        docs.into_iter()
            .map(|d| from_document(d).map_err(ModelError::from))
            .collect()
    }

    /// Deletes a task; a repeated delete is `NotFound`
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> ModelResult<()> {
        let id = parse_id(Self::RESOURCE, id)?;

        if store.delete_one(Self::COLLECTION, id).await? == 0 {
            return Err(ModelError::NotFound {
                resource: Self::RESOURCE,
            });
        }

        info!(task_id = %id, "Deleted task");
        Ok(())
    }

    /// Marks a task as done and returns the updated record
    ///
    /// # Errors
    ///
    /// - `MalformedIdentifier` if `id` is not a legal identifier
    /// - `NotFound` if no task has that identifier
    pub async fn mark_done(store: &dyn DocumentStore, id: &str) -> ModelResult<Self> {
        let id = parse_id(Self::RESOURCE, id)?;

        let mut fields = Document::new();
        fields.insert("isDone".to_string(), Value::Bool(true));

        let doc = store
            .set_fields(Self::COLLECTION, id, fields)
            .await?
            .ok_or(ModelError::NotFound {
                resource: Self::RESOURCE,
            })?;

        info!(task_id = %id, "Marked task done");
        Ok(from_document(doc)?)
    }
}
