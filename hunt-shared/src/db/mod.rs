/// Database layer
///
/// # Modules
///
/// - `client`: MongoDB connection setup, health check, and indexes
/// - `query`: backend-neutral filter and sort values
/// - `store`: the `DocumentStore` trait the models are written against
/// - `mongo`: MongoDB implementation of `DocumentStore`
/// - `memory`: in-memory implementation of `DocumentStore`

pub mod client;
pub mod memory;
pub mod mongo;
pub mod query;
pub mod store;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use query::{Filter, Sort, SortOrder, TextMatch};
pub use store::{Document, DocumentStore, StoreError};
