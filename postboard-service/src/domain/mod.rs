//! Domain entities and the document contract they share

mod comment;
mod post;

pub use comment::{Comment, PostRef};
pub use post::{Post, UserRef};

use serde::{de::DeserializeOwned, Serialize};

/// Contract every persistable entity implements
///
/// Identifiers are always optional on the entity itself: a transient entity
/// carries `None` until the store mints an id on insert. Relationship fields
/// are denormalized snapshots embedded in the document, so nothing here knows
/// about foreign keys.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection (table) the entity is stored in
    const TABLE: &'static str;

    /// Lowercase entity name used in logs, alert headers and error context
    const NAME: &'static str;

    /// Current identifier, `None` while transient
    fn id(&self) -> Option<&str>;

    /// Attach a store-assigned identifier
    fn set_id(&mut self, id: String);

    /// Overwrite this entity's simple fields with the patch's non-`None`
    /// fields. The identifier and relationship snapshots are never merged.
    fn merge(&mut self, patch: Self);

    /// Check required fields, returning a human-readable message on failure
    fn validate(&self) -> Result<(), String>;

    /// Field names (wire form) that list queries may sort by
    fn sortable_fields() -> &'static [&'static str];
}
