// Dispatch Board - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod dates;
pub mod entities;
pub mod filters;
pub mod finance;
pub mod fixtures;
pub mod permissions;
pub mod pipeline;
pub mod search;
pub mod sort;
pub mod store;

// Re-export commonly used types
pub use dates::{parse_or_epoch, parse_record_date, DateInterval};
pub use entities::{
    FinancialTransaction, Job, JobSource, JobStatus, PaymentType, Technician, TechnicianStatus,
    TransactionCategory, TransactionStatus,
};
pub use filters::{
    filter_by_category, filter_by_date_range, Categorized, Dated, OTHERS, UNCATEGORIZED,
};
pub use finance::{
    aggregate_transactions, company_profit, job_payout, technician_profit, FinancialSummary,
};
pub use fixtures::{
    dedup_transactions, load_job_sources_json, load_technicians_csv, load_transactions_csv,
    read_technicians_csv, read_transactions_csv,
};
pub use permissions::{can_view_job, visible_jobs, CurrentUser, Role};
pub use pipeline::ListQuery;
pub use search::{filter_by_query, matches_query, Searchable};
pub use sort::{sort_records, SortOption, Sortable};
pub use store::{
    JobSourceStore, MemoryBackend, SqliteBackend, StorageBackend, TransactionStore,
    JOB_SOURCES_KEY, TRANSACTIONS_KEY,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
