// ↕️ Sort Comparator Registry - fixed sort options over list entities
//
// Every option is a total order; the sort is stable, so ties keep input
// order and repeated application of the same option is idempotent. Records
// with missing or unparsable timestamps sort as the epoch ("oldest"), and
// missing numeric counters sort as zero. An unrecognized option key maps
// to Default, which leaves the input order untouched - a defined fallback,
// never an error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dates::parse_or_epoch;
use crate::entities::{JobSource, Technician};

// ============================================================================
// SORT OPTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    RevenueHigh,
    RevenueLow,
    JobsHigh,
    JobsLow,
    Default,
}

impl SortOption {
    /// Map a sort key from the UI / query string to an option.
    /// Unknown keys fall back to Default rather than erroring.
    pub fn from_key(key: &str) -> Self {
        match key {
            "newest" => SortOption::Newest,
            "oldest" => SortOption::Oldest,
            "name-asc" => SortOption::NameAsc,
            "name-desc" => SortOption::NameDesc,
            "revenue-high" => SortOption::RevenueHigh,
            "revenue-low" => SortOption::RevenueLow,
            "jobs-high" => SortOption::JobsHigh,
            "jobs-low" => SortOption::JobsLow,
            _ => SortOption::Default,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::RevenueHigh => "revenue-high",
            SortOption::RevenueLow => "revenue-low",
            SortOption::JobsHigh => "jobs-high",
            SortOption::JobsLow => "jobs-low",
            SortOption::Default => "default",
        }
    }

    /// Cycle through the options in display order (used by the TUI).
    pub fn next(&self) -> Self {
        match self {
            SortOption::Default => SortOption::Newest,
            SortOption::Newest => SortOption::Oldest,
            SortOption::Oldest => SortOption::NameAsc,
            SortOption::NameAsc => SortOption::NameDesc,
            SortOption::NameDesc => SortOption::RevenueHigh,
            SortOption::RevenueHigh => SortOption::RevenueLow,
            SortOption::RevenueLow => SortOption::JobsHigh,
            SortOption::JobsHigh => SortOption::JobsLow,
            SortOption::JobsLow => SortOption::Default,
        }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        SortOption::Default
    }
}

// ============================================================================
// SORTABLE RECORDS
// ============================================================================

/// Fields the comparator registry sorts on.
pub trait Sortable {
    fn sort_name(&self) -> &str;

    /// Raw creation/hire date string; None sorts as the epoch.
    fn sort_date(&self) -> Option<&str>;

    fn sort_revenue(&self) -> f64;

    fn sort_job_count(&self) -> i64;
}

impl Sortable for Technician {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_date(&self) -> Option<&str> {
        Some(&self.hire_date)
    }

    fn sort_revenue(&self) -> f64 {
        self.total_revenue
    }

    fn sort_job_count(&self) -> i64 {
        self.completed_jobs
    }
}

impl Sortable for JobSource {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn sort_revenue(&self) -> f64 {
        self.total_revenue
    }

    fn sort_job_count(&self) -> i64 {
        self.total_jobs
    }
}

// ============================================================================
// SORTING
// ============================================================================

fn by_date<T: Sortable>(a: &T, b: &T) -> Ordering {
    let da = a.sort_date().map(parse_or_epoch).unwrap_or_else(crate::dates::epoch);
    let db = b.sort_date().map(parse_or_epoch).unwrap_or_else(crate::dates::epoch);
    da.cmp(&db)
}

fn by_name<T: Sortable>(a: &T, b: &T) -> Ordering {
    // Case-insensitive comparison keeps "ann" and "Ann" adjacent
    a.sort_name()
        .to_lowercase()
        .cmp(&b.sort_name().to_lowercase())
}

fn by_revenue<T: Sortable>(a: &T, b: &T) -> Ordering {
    // NaN never arises from valid counters; total_cmp keeps the order total
    a.sort_revenue().total_cmp(&b.sort_revenue())
}

fn by_jobs<T: Sortable>(a: &T, b: &T) -> Ordering {
    a.sort_job_count().cmp(&b.sort_job_count())
}

/// Return a new sequence ordered per the option. The input is never
/// mutated; Default (and any unknown key mapped to it) returns the input
/// order unchanged.
pub fn sort_records<T: Sortable + Clone>(records: &[T], option: SortOption) -> Vec<T> {
    let mut sorted = records.to_vec();

    match option {
        SortOption::Newest => sorted.sort_by(|a, b| by_date(b, a)),
        SortOption::Oldest => sorted.sort_by(by_date),
        SortOption::NameAsc => sorted.sort_by(by_name),
        SortOption::NameDesc => sorted.sort_by(|a, b| by_name(b, a)),
        SortOption::RevenueHigh => sorted.sort_by(|a, b| by_revenue(b, a)),
        SortOption::RevenueLow => sorted.sort_by(by_revenue),
        SortOption::JobsHigh => sorted.sort_by(|a, b| by_jobs(b, a)),
        SortOption::JobsLow => sorted.sort_by(by_jobs),
        SortOption::Default => {}
    }

    sorted
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, created_at: Option<&str>, revenue: f64, jobs: i64) -> JobSource {
        let mut src = JobSource::new(name);
        src.created_at = created_at.map(str::to_string);
        src.total_revenue = revenue;
        src.total_jobs = jobs;
        src
    }

    fn names(records: &[JobSource]) -> Vec<&str> {
        records.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_from_key_known_and_unknown() {
        assert_eq!(SortOption::from_key("newest"), SortOption::Newest);
        assert_eq!(SortOption::from_key("jobs-low"), SortOption::JobsLow);
        assert_eq!(SortOption::from_key("bogus"), SortOption::Default);
        assert_eq!(SortOption::from_key(""), SortOption::Default);
    }

    #[test]
    fn test_key_round_trip() {
        for option in [
            SortOption::Newest,
            SortOption::Oldest,
            SortOption::NameAsc,
            SortOption::NameDesc,
            SortOption::RevenueHigh,
            SortOption::RevenueLow,
            SortOption::JobsHigh,
            SortOption::JobsLow,
        ] {
            assert_eq!(SortOption::from_key(option.as_key()), option);
        }
    }

    #[test]
    fn test_name_sort() {
        let records = vec![
            source("Bob", None, 100.0, 5),
            source("Ann", None, 200.0, 2),
        ];

        assert_eq!(names(&sort_records(&records, SortOption::NameAsc)), vec!["Ann", "Bob"]);
        assert_eq!(names(&sort_records(&records, SortOption::NameDesc)), vec!["Bob", "Ann"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let records = vec![
            source("bob", None, 0.0, 0),
            source("Ann", None, 0.0, 0),
            source("CARA", None, 0.0, 0),
        ];

        assert_eq!(
            names(&sort_records(&records, SortOption::NameAsc)),
            vec!["Ann", "bob", "CARA"]
        );
    }

    #[test]
    fn test_revenue_and_jobs_sort() {
        let records = vec![
            source("Bob", None, 100.0, 5),
            source("Ann", None, 200.0, 2),
        ];

        assert_eq!(
            names(&sort_records(&records, SortOption::RevenueHigh)),
            vec!["Ann", "Bob"]
        );
        assert_eq!(
            names(&sort_records(&records, SortOption::RevenueLow)),
            vec!["Bob", "Ann"]
        );
        assert_eq!(names(&sort_records(&records, SortOption::JobsHigh)), vec!["Bob", "Ann"]);
        assert_eq!(names(&sort_records(&records, SortOption::JobsLow)), vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_date_sort_with_missing_and_malformed() {
        let records = vec![
            source("Mid", Some("2023-06-01"), 0.0, 0),
            source("None", None, 0.0, 0),
            source("Bad", Some("garbage"), 0.0, 0),
            source("New", Some("2024-06-01"), 0.0, 0),
        ];

        // Missing/malformed dates sort as epoch = oldest
        assert_eq!(
            names(&sort_records(&records, SortOption::Oldest)),
            vec!["None", "Bad", "Mid", "New"]
        );
        assert_eq!(
            names(&sort_records(&records, SortOption::Newest)),
            vec!["New", "Mid", "None", "Bad"]
        );
    }

    #[test]
    fn test_default_returns_input_order() {
        let records = vec![
            source("Zed", Some("2024-01-01"), 9.0, 9),
            source("Ann", Some("2020-01-01"), 1.0, 1),
        ];

        assert_eq!(names(&sort_records(&records, SortOption::Default)), vec!["Zed", "Ann"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let records = vec![
            source("B", None, 100.0, 1),
            source("A", None, 100.0, 2),
            source("C", None, 100.0, 3),
        ];

        // Equal revenue everywhere: stable sort keeps input order
        let once = sort_records(&records, SortOption::RevenueHigh);
        assert_eq!(names(&once), vec!["B", "A", "C"]);

        let twice = sort_records(&once, SortOption::RevenueHigh);
        assert_eq!(names(&twice), names(&once));
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let records = vec![
            source("Bob", None, 100.0, 5),
            source("Ann", None, 200.0, 2),
        ];

        let _ = sort_records(&records, SortOption::NameAsc);
        assert_eq!(names(&records), vec!["Bob", "Ann"]);
    }

    #[test]
    fn test_option_cycle_covers_all_variants() {
        let mut seen = vec![];
        let mut current = SortOption::Default;
        loop {
            current = current.next();
            if current == SortOption::Default {
                break;
            }
            seen.push(current);
        }
        assert_eq!(seen.len(), 8);
    }
}
