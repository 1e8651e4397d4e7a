/// In-memory implementation of DocumentStore for testing and development
///
/// Collections are vectors of documents kept in insertion order behind a
/// single `RwLock`. Filters are compiled once per query; text predicates use
/// the same escaped, case-insensitive patterns the MongoDB backend sends to
/// the server, so both backends agree on what matches.
///
/// Sorting follows MongoDB's cross-type ordering (missing/null, then numbers,
/// then strings, then booleans) and is stable, so ties keep insertion order.

use super::query::{Filter, Sort, SortOrder};
use super::store::{Document, DocumentStore, StoreError, ID_FIELD};
use crate::id::RecordId;
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory document store
///
/// Cloning is cheap and clones share the same data, which lets a test keep a
/// handle for assertions while the application holds another.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

/// Compiled form of a [`Filter`]
enum Matcher {
    All,
    Id(String),
    Equals { field: String, value: Value },
    Pattern { field: String, regex: Regex },
    And(Vec<Matcher>),
}

impl Matcher {
    fn compile(filter: &Filter) -> Result<Self, StoreError> {
        Ok(match filter {
            Filter::All => Matcher::All,
            Filter::Id(id) => Matcher::Id(id.to_hex()),
            Filter::Equals { field, value } => Matcher::Equals {
                field: field.clone(),
                value: value.clone(),
            },
            Filter::Text { field, value, mode } => {
                let regex = RegexBuilder::new(&mode.pattern(value))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| StoreError::InvalidQuery(e.to_string()))?;
                Matcher::Pattern {
                    field: field.clone(),
                    regex,
                }
            }
            Filter::And(filters) => Matcher::And(
                filters
                    .iter()
                    .map(Matcher::compile)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }

    fn matches(&self, doc: &Document) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Id(hex) => doc.get(ID_FIELD).and_then(Value::as_str) == Some(hex.as_str()),
            Matcher::Equals { field, value } => doc
                .get(field)
                .is_some_and(|stored| values_equal(stored, value)),
            Matcher::Pattern { field, regex } => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| regex.is_match(s)),
            Matcher::And(matchers) => matchers.iter().all(|m| m.matches(doc)),
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Rank of a value's type in MongoDB's comparison order
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn sort_documents(docs: &mut [Document], sort: &Sort) {
    docs.sort_by(|a, b| {
        let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &Sort,
    ) -> Result<Vec<Document>, StoreError> {
        let matcher = Matcher::compile(filter)?;

        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matcher.matches(d)).cloned().collect())
            .unwrap_or_default();

        sort_documents(&mut docs, sort);
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, StoreError> {
        let matcher = Matcher::compile(&Filter::Id(id))?;

        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matcher.matches(d)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<RecordId, StoreError> {
        let id = RecordId::new();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, StoreError> {
        let matcher = Matcher::compile(&Filter::Id(id))?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match docs.iter().position(|d| matcher.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<Option<Document>, StoreError> {
        let matcher = Matcher::compile(&Filter::Id(id))?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matcher.matches(d)))
        else {
            return Ok(None);
        };

        for (key, value) in fields {
            if key != ID_FIELD {
                doc.insert(key, value);
            }
        }

        Ok(Some(doc.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.collections
            .read()
            .map(|_| ())
            .map_err(|_| StoreError::LockPoisoned)
    }
}
