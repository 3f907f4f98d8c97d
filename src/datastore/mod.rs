//! Persistence abstraction for dispatchable models.
//!
//! The dispatcher only needs four primitives: fetch by id, query all, batch
//! put, and batch delete. Implementations own identity assignment (numeric,
//! on first persist) and result ordering; they know nothing about templates,
//! JSON, or HTTP.
//!
//! Two calls per mutating request — one put of the save set, one delete of
//! the delete set — with no atomicity guarantee across them.

pub mod in_memory;

pub use in_memory::InMemoryDatastore;

use crate::handler::ListQuery;
use crate::model::Model;
use std::future::Future;

/// Storage primitives the dispatcher composes.
pub trait Datastore<M: Model>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one record by numeric identity.
    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Option<M>, Self::Error>> + Send;

    /// Fetch all records matching the query's equality filters, in a
    /// consistent order.
    fn query(&self, query: &ListQuery) -> impl Future<Output = Result<Vec<M>, Self::Error>> + Send;

    /// Persist a batch of records, assigning identities to records that have
    /// none, and return the stored state in input order.
    fn put(&self, models: Vec<M>) -> impl Future<Output = Result<Vec<M>, Self::Error>> + Send;

    /// Delete a batch of records. Records without an identity are ignored.
    fn delete(&self, models: Vec<M>) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
