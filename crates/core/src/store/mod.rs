//! Access to the document database.

mod fetch;
mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::{Document, DocumentError};
use crate::query::Filter;

pub use fetch::{fetch, Collection, CAMPAIGN_FIELD};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("query rejected: {0}")]
    QueryRejected(String),

    #[error("malformed document: {0}")]
    Decode(#[from] DocumentError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A queryable document database, shared read-only by every request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection` that satisfies `filter`,
    /// in whatever order the backend yields them.
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
