/// Record identifiers
///
/// Every stored Hunt and Task is keyed by a [`RecordId`]. Identifiers arrive
/// from clients as strings (path segments), so the only way to obtain one from
/// user input is [`RecordId::parse`], which rejects anything that is not a
/// legal store key. Handlers and models never look at the underlying
/// representation.
///
/// On the wire a `RecordId` is its 24 character lowercase hex form.

use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The string is not a legal store key
    #[error("Malformed identifier: {0:?}")]
    Malformed(String),
}

/// Opaque, store-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(ObjectId);

impl RecordId {
    /// Generates a fresh identifier
    ///
    /// Backends that assign their own keys (MongoDB) never call this; the
    /// in-memory store and tests do.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parses a client-supplied identifier
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Malformed`] when `value` is not 24 hex characters.
    ///
    /// # Example
    ///
    /// ```
    /// use hunt_shared::id::RecordId;
    ///
    /// assert!(RecordId::parse("588935f57546a2daea44de7c").is_ok());
    /// assert!(RecordId::parse("bad").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, IdError> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| IdError::Malformed(value.to_string()))
    }

    /// Returns the hex form used on the wire
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub(crate) fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub(crate) fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
