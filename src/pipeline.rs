// 🔁 List Pipeline - search → category → date → sort, in that order
//
// Every list/table view composes the same four stages over its entity
// collection. Stages are independent; ordering only matters in that the
// sort runs after the filters. The query is plain data so the TUI and the
// API server can both build one from their own inputs.

use crate::dates::DateInterval;
use crate::filters::{filter_by_category, filter_by_date_range, Categorized, Dated};
use crate::search::{filter_by_query, Searchable};
use crate::sort::{sort_records, SortOption, Sortable};

/// A complete list-view query. Default is "show everything, input order".
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Free-text search; empty matches all
    pub search: String,

    /// Selected category labels; empty means no category filter
    pub categories: Vec<String>,

    /// Date window for the record's relevant date
    pub interval: DateInterval,

    /// The date filter only runs once the user has confirmed it.
    /// Pending picker state is not filtering state.
    pub date_filter_applied: bool,

    pub sort: SortOption,
}

impl ListQuery {
    pub fn new() -> Self {
        ListQuery::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_interval(mut self, interval: DateInterval) -> Self {
        self.interval = interval;
        self.date_filter_applied = true;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Run the full pipeline. The input is never mutated.
    pub fn apply<T>(&self, records: &[T]) -> Vec<T>
    where
        T: Searchable + Categorized + Dated + Sortable + Clone,
    {
        let searched = filter_by_query(records, &self.search);
        let categorized = filter_by_category(&searched, &self.categories);
        let dated = filter_by_date_range(&categorized, &self.interval, self.date_filter_applied);
        sort_records(&dated, self.sort)
    }
}

// ============================================================================
// TESTS
// ============================================================================
