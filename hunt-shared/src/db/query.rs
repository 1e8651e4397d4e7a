/// Backend-neutral query values
///
/// A [`Filter`] is a predicate tree over stored document fields and a
/// [`Sort`] is a single field plus direction. Models build these from typed
/// request parameters; each [`DocumentStore`](super::store::DocumentStore)
/// backend translates them into its own query language.
///
/// Text predicates always match the supplied value literally and without
/// regard to case; the value is escaped before it becomes a pattern.

use crate::id::RecordId;
use serde_json::Value;

/// How a text predicate compares a stored string with the supplied value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Whole value must match
    Exact,

    /// Supplied value may appear anywhere in the stored value
    Contains,
}

/// Predicate over stored documents
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,

    /// Matches the document with this identifier
    Id(RecordId),

    /// Field equals the value exactly (numbers compare numerically)
    Equals { field: String, value: Value },

    /// Case-insensitive text comparison on a string field
    Text {
        field: String,
        value: String,
        mode: TextMatch,
    },

    /// Every sub-filter must match
    And(Vec<Filter>),
}

impl Filter {
    /// Exact-match predicate
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive whole-value predicate
    pub fn text_exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Text {
            field: field.into(),
            value: value.into(),
            mode: TextMatch::Exact,
        }
    }

    /// Case-insensitive substring predicate
    pub fn text_contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Text {
            field: field.into(),
            value: value.into(),
            mode: TextMatch::Contains,
        }
    }

    /// Combines predicates with logical AND
    ///
    /// No predicates collapses to [`Filter::All`]; a single predicate is
    /// returned unwrapped.
    pub fn all_of(mut filters: Vec<Filter>) -> Self {
        filters.retain(|f| *f != Filter::All);
        match filters.len() {
            0 => Filter::All,
            1 => filters.remove(0),
            _ => Filter::And(filters),
        }
    }
}

impl TextMatch {
    /// Regex pattern matching `value` literally under this mode
    ///
    /// Backends apply the pattern case-insensitively.
    pub fn pattern(&self, value: &str) -> String {
        let escaped = regex::escape(value);
        match self {
            TextMatch::Exact => format!("^{}$", escaped),
            TextMatch::Contains => escaped,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Interprets a `sortorder` request parameter
    ///
    /// Only the exact string `desc` selects descending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Ordering applied to a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}
