//! Arguments shared by the paginated `list` command.

use clap::Args;

use prodctl_core::config::PaginationConfig;
use prodctl_core::types::pagination::PageRequest;

/// Arguments for listing one page of records
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Records per page (defaults to the configured page size)
    #[arg(long, allow_negative_numbers = true)]
    pub per_page: Option<i64>,

    /// Field to sort on; unknown fields fall back to the default ordering
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(short, long)]
    pub desc: bool,

    /// Case-insensitive text to search for in the searchable fields
    #[arg(long)]
    pub filter: Option<String>,
}

impl ListArgs {
    /// Build the repository request for these arguments.
    pub fn to_request(&self, limits: &PaginationConfig) -> PageRequest {
        let items_per_page = self
            .per_page
            .unwrap_or_else(|| i64::try_from(limits.default_items_per_page).unwrap_or(i64::MAX));

        PageRequest {
            page: self.page,
            items_per_page,
            sort_by: self.sort.clone(),
            descending: self.desc,
            filter_text: self.filter.clone(),
        }
    }
}
