/// Hunt model and store operations
///
/// A Hunt is a named scavenger-hunt event owned by a host.
///
/// # Document shape
///
/// ```json
/// {
///   "_id": "65d8f8d6384ab865a9acad5f",
///   "title": "Campus Crawl",
///   "hostId": "65d8f8d62b531fa812f0f498",
///   "description": "A hunt for the Morris bear",
///   "task": "Find the bear"
/// }
/// ```
///
/// # Listing
///
/// `GET /api/hunts` accepts `hostid` (case-insensitive exact match on
/// `hostId`), `title` and `description` (case-insensitive substring), and
/// `sortby` / `sortorder`. Results are ordered by `title` ascending unless
/// told otherwise. Other parameters are ignored.

use super::{from_document, non_empty, parse_id, to_document};
use crate::db::query::{Filter, Sort, SortOrder};
use crate::db::store::DocumentStore;
use crate::error::{ModelError, ModelResult};
use crate::id::RecordId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, info};
use validator::Validate;

/// Hunt record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunt {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Hunt title
    pub title: String,

    /// Host who created the hunt
    #[serde(default)]
    pub host_id: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Contact/tag field
    #[serde(default)]
    pub task: String,
}

impl PartialEq for Hunt {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Hunt {}

impl Hash for Hunt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Input for creating a hunt
///
/// Missing fields deserialize as empty strings so that an absent `title`
/// fails validation instead of JSON parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewHunt {
    #[serde(default)]
    #[validate(length(min = 1, message = "Hunt must have a non-empty title"))]
    pub title: String,

    #[serde(default)]
    pub host_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Hunt must have a non-empty task"))]
    pub task: String,
}

impl NewHunt {
    /// Order in which field rules are reported
    const RULE_ORDER: &'static [&'static str] = &["title", "task"];
}

/// Field a hunt listing can be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HuntSortField {
    #[default]
    Title,
    HostId,
    Description,
}

impl HuntSortField {
    /// Stored field name
    pub fn field(&self) -> &'static str {
        match self {
            HuntSortField::Title => "title",
            HuntSortField::HostId => "hostId",
            HuntSortField::Description => "description",
        }
    }
}

impl FromStr for HuntSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(HuntSortField::Title),
            "hostid" => Ok(HuntSortField::HostId),
            "description" => Ok(HuntSortField::Description),
            other => Err(format!(
                "unknown sortby `{}`, expected one of title, hostid, description",
                other
            )),
        }
    }
}

/// Recognized `GET /api/hunts` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HuntQuery {
    pub hostid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub sortby: Option<HuntSortField>,
    pub sortorder: Option<String>,
}

impl HuntQuery {
    /// Builds the combined predicate; no parameters matches every hunt
    pub fn filter(&self) -> Filter {
        let mut filters = Vec::new();

        if let Some(host) = non_empty(&self.hostid) {
            filters.push(Filter::text_exact("hostId", host));
        }
        if let Some(title) = non_empty(&self.title) {
            filters.push(Filter::text_contains("title", title));
        }
        if let Some(description) = non_empty(&self.description) {
            filters.push(Filter::text_contains("description", description));
        }

        Filter::all_of(filters)
    }

    pub fn sort(&self) -> Sort {
        Sort::new(
            self.sortby.unwrap_or_default().field(),
            SortOrder::from_param(self.sortorder.as_deref()),
        )
    }
}

impl Hunt {
    /// Collection holding hunts
    pub const COLLECTION: &'static str = "hunts";

    /// Name used in client-facing error messages
    pub const RESOURCE: &'static str = "hunt";

    /// Validates and inserts a new hunt
    ///
    /// # Returns
    ///
    /// The identifier assigned by the store
    ///
    /// # Errors
    ///
    /// - `Validation` for the first broken rule (`title`, then `task`);
    ///   nothing is inserted
    /// - `Store` if the insert fails
    pub async fn create(store: &dyn DocumentStore, data: NewHunt) -> ModelResult<RecordId> {
        data.validate()
            .map_err(|e| ModelError::first_violation(&e, NewHunt::RULE_ORDER))?;

        let id = store
            .insert_one(Self::COLLECTION, to_document(&data)?)
            .await?;

        info!(hunt_id = %id, title = %data.title, "Created hunt");
        Ok(id)
    }

    /// Finds a hunt by its client-supplied identifier
    ///
    /// # Errors
    ///
    /// - `MalformedIdentifier` if `id` is not a legal identifier
    /// - `NotFound` if no hunt has that identifier
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

    /// Lists hunts matching `query`, sorted as it requests
    pub async fn list(store: &dyn DocumentStore, query: &HuntQuery) -> ModelResult<Vec<Self>> {
        let filter = query.filter();
        let sort = query.sort();
        debug!(?filter, ?sort, "Listing hunts");

        let docs = store.find(Self::COLLECTION, &filter, &sort).await?;

        docs.into_iter()
            .map(|d| from_document(d).map_err(ModelError::from))
            .collect()
    }

    /// Deletes a hunt
    ///
    /// # Errors
    ///
    /// - `MalformedIdentifier` if `id` is not a legal identifier
    /// - `NotFound` if nothing was deleted, including a repeated delete
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> ModelResult<()> {
        let id = parse_id(Self::RESOURCE, id)?;

        let deleted = store.delete_one(Self::COLLECTION, id).await?;
        if deleted == 0 {
            return Err(ModelError::NotFound {
                resource: Self::RESOURCE,
            });
        }

        info!(hunt_id = %id, "Deleted hunt");
        Ok(())
    }
}
