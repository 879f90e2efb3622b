//! Remote document store contract and the MongoDB-backed implementation.

mod mongo;

pub use mongo::*;

use mongodb::bson::Document;

use crate::error::Result;
use crate::query::QueryContext;

/// Mutating and query calls the mediator issues against the document store.
///
/// `save` has upsert semantics: replace the document matched by `_id`, or
/// insert it if absent. `rerun_query` re-executes the context's original
/// query and delivers the fresh result set to the attached result surface;
/// the caller treats it as fire-and-forget.
pub trait RemoteStore {
    fn remove(&self, filter: Document, database: &str, collection: &str) -> Result<()>;

    fn save(&self, document: Document, database: &str, collection: &str) -> Result<()>;

    fn insert(&self, document: Document, database: &str, collection: &str) -> Result<()>;

    fn rerun_query(&self, skip: u64, context: &QueryContext) -> Result<()>;
}
