//! # Hunt Shared Library
//!
//! Domain types, resource operations, and persistence used by the Hunt API
//! server.
//!
//! ## Module Organization
//!
//! - `id`: store-assigned record identifiers and their parsing
//! - `db`: document-store abstraction, MongoDB and in-memory backends
//! - `models`: Hunt and Task records with their create/read/list/delete rules
//! - `error`: errors returned by the model operations

pub mod db;
pub mod error;
pub mod id;
pub mod models;

/// Current version of the Hunt shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
