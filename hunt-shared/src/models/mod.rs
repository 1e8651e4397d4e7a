/// Domain models and their store operations
///
/// # Models
///
/// - `hunt`: scavenger-hunt events (`hunts` collection)
/// - `task`: steps within a hunt (`tasks` collection)
///
/// Each model exposes its operations as associated async functions taking the
/// store handle first, e.g. `Hunt::find_by_id(store, id)`.
///
/// # Example
///
/// ```rust,ignore
/// use hunt_shared::db::InMemoryStore;
/// use hunt_shared::models::hunt::{Hunt, NewHunt};
///
/// let store = InMemoryStore::new();
/// let id = Hunt::create(&store, NewHunt {
///     title: "Campus Crawl".to_string(),
///     task: "Find the bear".to_string(),
///     ..Default::default()
/// }).await?;
/// let hunt = Hunt::find_by_id(&store, &id.to_hex()).await?;
/// ```

pub mod hunt;
pub mod task;

use crate::db::store::{Document, StoreError};
use crate::error::{ModelError, ModelResult};
use crate::id::RecordId;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parses a client-supplied identifier for `resource`
pub(crate) fn parse_id(resource: &'static str, id: &str) -> ModelResult<RecordId> {
    RecordId::parse(id).map_err(|_| ModelError::MalformedIdentifier { resource })
}

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(StoreError::Serialization(
            "Model did not serialize to an object".to_string(),
        )),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(serde_json::Value::Object(document))?)
}

/// Returns the parameter value unless it is absent or empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parses an optional query parameter, treating an empty value as absent
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
