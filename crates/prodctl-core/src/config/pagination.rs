//! Pagination limits.

use serde::{Deserialize, Serialize};

/// Bounds applied when normalizing page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not ask for one.
    #[serde(default = "default_items_per_page")]
    pub default_items_per_page: u64,
    /// Larger page sizes are clamped down to this value.
    #[serde(default = "default_max_items_per_page")]
    pub max_items_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_items_per_page: default_items_per_page(),
            max_items_per_page: default_max_items_per_page(),
        }
    }
}

fn default_items_per_page() -> u64 {
    10
}

fn default_max_items_per_page() -> u64 {
    1000
}
