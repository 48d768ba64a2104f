//! Pagination request and response types.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PaginationConfig;
use crate::types::descriptor::EntityDescriptor;
use crate::types::filter::SearchText;
use crate::types::sorting::SortDirection;

/// Default page size.
const DEFAULT_ITEMS_PER_PAGE: i64 = 10;

/// Largest value a backend `BIGINT` can hold.
pub const MAX_SQL_INTEGER: u64 = i64::MAX as u64;

/// Caller-supplied parameters for a paginated read.
///
/// Every field is untrusted. Nothing here is ever embedded in a statement
/// directly; [`PageRequest::normalize`] turns it into a [`NormalizedRequest`]
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based). Values below 1 are coerced to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Values below 1 are coerced to 1.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: i64,
    /// Field to order by. Unknown names fall back to the default ordering.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Reverse the ordering.
    #[serde(default)]
    pub descending: bool,
    /// Free text matched against the searchable fields.
    #[serde(default)]
    pub filter_text: Option<String>,
}

impl PageRequest {
    /// Create a request for a page without sorting or filtering.
    pub fn new(page: i64, items_per_page: i64) -> Self {
        Self {
            page,
            items_per_page,
            ..Self::default()
        }
    }

    /// Order by the given field.
    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Set the ordering direction.
    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Filter on the given text.
    pub fn with_filter(mut self, text: impl Into<String>) -> Self {
        self.filter_text = Some(text.into());
        self
    }

    /// Validate against an entity's descriptor.
    ///
    /// Never fails: out-of-range page numbers and sizes are coerced and an
    /// undeclared sort field is dropped in favour of the default ordering.
    pub fn normalize(
        &self,
        descriptor: &EntityDescriptor,
        limits: &PaginationConfig,
    ) -> NormalizedRequest {
        let page = if self.page < 1 {
            debug!(requested = self.page, "Page below 1, using first page");
            1
        } else {
            self.page as u64
        };

        let max = limits.max_items_per_page.max(1);
        let items_per_page = if self.items_per_page < 1 {
            debug!(requested = self.items_per_page, "Page size below 1, using 1");
            1
        } else if self.items_per_page as u64 > max {
            debug!(requested = self.items_per_page, max, "Page size clamped");
            max
        } else {
            self.items_per_page as u64
        };

        let sort_by = self.sort_by.as_deref().and_then(|name| {
            let resolved = descriptor.resolve_field(name);
            if resolved.is_none() {
                debug!(
                    table = %descriptor.table(),
                    "Ignoring undeclared sort field, using default ordering"
                );
            }
            resolved
        });

        NormalizedRequest {
            page,
            items_per_page,
            sort_by,
            direction: SortDirection::from_descending(self.descending),
            filter: SearchText::new(self.filter_text.as_deref()),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            items_per_page: default_items_per_page(),
            sort_by: None,
            descending: false,
            filter_text: None,
        }
    }
}

/// A page request after validation against a descriptor.
///
/// Invariants: `page >= 1`, `1 <= items_per_page <= max`, and `sort_by`, when
/// present, is the descriptor's own declared field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub items_per_page: u64,
    /// Declared field to order by, or `None` for the default ordering.
    pub sort_by: Option<&'static str>,
    /// Ordering direction for every ordering field.
    pub direction: SortDirection,
    /// Free-text filter, if any.
    pub filter: Option<SearchText>,
}

impl NormalizedRequest {
    /// Calculate the SQL `OFFSET` value.
    ///
    /// Never exceeds [`MAX_SQL_INTEGER`], so huge page numbers still render
    /// as a valid signed 64-bit literal.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.items_per_page)
            .min(MAX_SQL_INTEGER)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.items_per_page.min(MAX_SQL_INTEGER)
    }
}

/// Paginated result with navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of matching items across all pages.
    pub total_items: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1)).max(1);
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_items_per_page() -> i64 {
    DEFAULT_ITEMS_PER_PAGE
}
