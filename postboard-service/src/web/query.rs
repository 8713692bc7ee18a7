//! Pagination query parameters for list endpoints
//!
//! The page index is 0-based and `sort` takes the `field,direction` form,
//! e.g. `?page=1&size=25&sort=creationDate,desc`.

use serde::{Deserialize, Serialize};

use crate::store::{PageRequest, SortOrder};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum allowed items per page
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters accepted by paginated list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page index (0-based). None defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page. None defaults to DEFAULT_PAGE_SIZE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Sort specification: `field` or `field,asc|desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Eager-load relationship snapshots; accepted for wire compatibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eagerload: Option<bool>,
}

impl PageQuery {
    /// The 0-based page index, defaulting to the first page
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Items per page, clamped to 1..=MAX_PAGE_SIZE
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of records to skip
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index()) * u64::from(self.page_size())
    }

    /// Whether relationship snapshots should be eagerly loaded (default true)
    #[must_use]
    pub fn is_eagerload(&self) -> bool {
        self.eagerload.unwrap_or(true)
    }

    /// Parse the `field,direction` sort parameter
    ///
    /// The direction is taken from the second comma-separated segment and
    /// defaults to ascending when it is missing or not `desc`
    /// (case-insensitive). Segments past the direction are ignored.
    #[must_use]
    pub fn sort_spec(&self) -> Option<(String, SortOrder)> {
        let raw = self.sort.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let mut segments = raw.split(',');
        let field = segments.next().unwrap_or_default().trim();
        let direction = segments.next().unwrap_or_default().trim();
        if field.is_empty() {
            return None;
        }
        let order = if direction.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Some((field.to_string(), order))
    }

    /// Convert into a store page request
    #[must_use]
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest {
            offset: self.offset(),
            limit: self.page_size(),
            sort: self.sort_spec(),
        }
    }
}
