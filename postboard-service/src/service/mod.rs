//! Entity orchestration between the HTTP boundary and the store

use crate::domain::Document;
use crate::store::{EntityStore, PageRequest, StoreResult};

/// Async orchestration for one entity collection
///
/// A thin layer over [`EntityStore`]: it owns the merge semantics for
/// partial updates and the operation-level logging, and leaves identifier
/// assignment entirely to the store.
#[derive(Clone)]
pub struct EntityService<S> {
    store: S,
}

impl<S: EntityStore> EntityService<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a new entity; the store mints the identifier
    pub async fn save(&self, entity: S::Entity) -> StoreResult<S::Entity> {
        tracing::debug!(entity = <S::Entity>::NAME, "request to save");
        self.store.insert(entity).await
    }

    /// Full overwrite of an existing entity
    ///
    /// Returns `Ok(None)` when the record no longer exists, which the
    /// boundary reports as not found.
    pub async fn update(&self, entity: S::Entity) -> StoreResult<Option<S::Entity>> {
        tracing::debug!(entity = <S::Entity>::NAME, "request to update");
        self.store.replace(entity).await
    }

    /// Merge-patch an existing entity
    ///
    /// Reads the current record, overwrites only the patch's non-`None`
    /// fields and writes the merged record back. `Ok(None)` when the record
    /// is missing.
    pub async fn partial_update(&self, patch: S::Entity) -> StoreResult<Option<S::Entity>> {
        tracing::debug!(entity = <S::Entity>::NAME, "request to partially update");

        let Some(id) = patch.id().map(str::to_string) else {
            return Ok(None);
        };

        let Some(mut existing) = self.store.get(&id).await? else {
            return Ok(None);
        };

        existing.merge(patch);
        self.store.replace(existing).await
    }

    /// Fetch one page of entities
    pub async fn find_all(&self, page: &PageRequest) -> StoreResult<Vec<S::Entity>> {
        tracing::debug!(entity = <S::Entity>::NAME, "request to get all");
        self.store.list(page).await
    }

    /// Fetch one page of entities with their relationship snapshots
    ///
    /// Relationships are embedded in the document, so this resolves to the
    /// same query as [`Self::find_all`]; the operation exists for API parity
    /// with relational deployments.
    pub async fn find_all_with_eager_relationships(
        &self,
        page: &PageRequest,
    ) -> StoreResult<Vec<S::Entity>> {
        self.store.list(page).await
    }

    /// Total number of entities, paired with `find_all` for pagination headers
    pub async fn count_all(&self) -> StoreResult<u64> {
        self.store.count().await
    }

    /// Fetch a single entity with its relationship snapshots
    pub async fn find_one(&self, id: &str) -> StoreResult<Option<S::Entity>> {
        tracing::debug!(entity = <S::Entity>::NAME, id, "request to get");
        self.store.get(id).await
    }

    /// Check existence without fetching the record body
    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        self.store.exists(id).await
    }

    /// Delete by id; resolves Ok whether or not the id existed
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        tracing::debug!(entity = <S::Entity>::NAME, id, "request to delete");
        self.store.delete(id).await
    }
}
