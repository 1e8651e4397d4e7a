/// Errors returned by the resource operations
///
/// Every model operation returns [`ModelResult`]. The first three variants
/// are client mistakes with fixed, resource-specific messages; `Store` is a
/// backend failure and carries no client-facing meaning.

use crate::db::store::StoreError;
use thiserror::Error;
use validator::ValidationErrors;

/// Result alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Model operation errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// The identifier is not a legal store key
    #[error("The requested {resource} id wasn't a legal Mongo Object ID.")]
    MalformedIdentifier { resource: &'static str },

    /// The identifier is well formed but nothing is stored under it
    #[error("The requested {resource} was not found")]
    NotFound { resource: &'static str },

    /// A create payload broke a field rule
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Backend failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ModelError {
    /// Picks the first violated rule from `errors`, checking fields in `order`
    ///
    /// `validator` reports every failing field at once and in no particular
    /// order; the models declare the order their rules are checked in, using
    /// the field names clients see.
    pub fn first_violation(errors: &ValidationErrors, order: &[&'static str]) -> Self {
        let field_errors = errors.field_errors();

        for field in order {
            let wanted = normalize(field);
            let found = field_errors
                .iter()
                .find(|(key, _)| normalize(&key.to_string()) == wanted)
                .and_then(|(_, errs)| errs.first());

            if let Some(error) = found {
                return ModelError::Validation {
                    field: (*field).to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field)),
                };
            }
        }

        ModelError::Validation {
            field: String::new(),
            message: "Request validation failed".to_string(),
        }
    }
}

/// Field names compare without case or underscores (`hunt_id` == `huntId`)
fn normalize(field: &str) -> String {
    field.replace('_', "").to_ascii_lowercase()
}
