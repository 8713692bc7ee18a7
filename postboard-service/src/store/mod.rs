//! Persistence abstraction over the document store

mod error;
mod surreal;

pub use error::{StoreError, StoreErrorKind, StoreOperation, StoreResult};
pub use surreal::{connect, SurrealClient, SurrealStore};

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::domain::Document;

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending (Z-A, 9-0, newest first)
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl SortOrder {
    /// Convert to an ORDER BY clause fragment
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One page window over a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of records to skip
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u32,
    /// Optional single-field ordering (wire field name + direction)
    pub sort: Option<(String, SortOrder)>,
}

impl PageRequest {
    /// Create a page request with no ordering
    #[must_use]
    pub fn new(offset: u64, limit: u32) -> Self {
        Self {
            offset,
            limit,
            sort: None,
        }
    }

    /// Attach an ordering to this page request
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }
}

/// Async store contract for a single entity collection
///
/// The store is the sole authority over identifiers: `insert` mints a fresh
/// id for a transient entity, and nothing else ever assigns one. Missing
/// records are expressed through `Option`/no-ops, never through errors.
pub trait EntityStore: Send + Sync {
    /// The entity this store persists
    type Entity: Document;

    /// Fetch a record by id
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<Self::Entity>>> + Send;

    /// Insert a transient entity, minting and returning its identifier
    ///
    /// Fails with `InvalidArgument` if the entity already carries an id.
    fn insert(
        &self,
        entity: Self::Entity,
    ) -> impl Future<Output = StoreResult<Self::Entity>> + Send;

    /// Unconditionally overwrite the record keyed by the entity's id
    ///
    /// Returns `None` when no such record exists (last writer lost a race
    /// with a delete); the previous contents are not consulted.
    fn replace(
        &self,
        entity: Self::Entity,
    ) -> impl Future<Output = StoreResult<Option<Self::Entity>>> + Send;

    /// Check whether a record with the given id exists
    fn exists(&self, id: &str) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Delete the record with the given id; deleting a missing id is Ok
    fn delete(&self, id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Count all records in the collection
    fn count(&self) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Fetch one page of records
    fn list(
        &self,
        page: &PageRequest,
    ) -> impl Future<Output = StoreResult<Vec<Self::Entity>>> + Send;
}
