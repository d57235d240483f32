// 🗂️ Category & Date-Range Filters - set-membership and interval predicates
//
// Both filters are stable: output preserves input relative order. An empty
// category selection means "no filter", not "exclude all" - callers present
// an explicit "All" option mapped to the empty set. Records lacking the
// filtered attribute are reachable only through the per-entity sentinel
// bucket ("Uncategorized" for technicians, "Others" for job sources).

use crate::dates::DateInterval;
use crate::entities::{FinancialTransaction, Job, JobSource, Technician};

/// Sentinel bucket for technicians without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Sentinel bucket for job sources without a category.
pub const OTHERS: &str = "Others";

// ============================================================================
// CATEGORY FILTER
// ============================================================================

/// Records with an optional category attribute and a sentinel bucket for
/// records lacking it.
pub trait Categorized {
    fn category(&self) -> Option<&str>;

    /// Label the UI shows for records without a category. Selecting it in
    /// the filter set includes those records.
    fn uncategorized_label() -> &'static str;
}

impl Categorized for Technician {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn uncategorized_label() -> &'static str {
        UNCATEGORIZED
    }
}

impl Categorized for JobSource {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn uncategorized_label() -> &'static str {
        OTHERS
    }
}

/// Keep records whose category is in the selected set.
///
/// Empty selection returns the input unchanged. A record without a
/// category is kept only when the selection contains the entity's
/// sentinel label.
pub fn filter_by_category<T: Categorized + Clone>(records: &[T], selected: &[String]) -> Vec<T> {
    if selected.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| match record.category() {
            Some(category) => selected.iter().any(|s| s == category),
            None => selected.iter().any(|s| s == T::uncategorized_label()),
        })
        .cloned()
        .collect()
}

// ============================================================================
// DATE-RANGE FILTER
// ============================================================================

/// Records with an optional date string relevant for range filtering
/// (hire date, creation date, transaction date).
pub trait Dated {
    fn record_date(&self) -> Option<&str>;
}

impl Dated for Technician {
    fn record_date(&self) -> Option<&str> {
        Some(&self.hire_date)
    }
}

impl Dated for JobSource {
    fn record_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Dated for Job {
    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

impl Dated for FinancialTransaction {
    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

/// Keep records whose date falls within the interval (inclusive bounds).
///
/// Filtering only happens when the caller has explicitly applied it AND
/// the interval has a lower bound; otherwise the input passes through
/// unchanged. A record with no date passes unconditionally; a record with
/// a malformed date fails membership and is excluded.
pub fn filter_by_date_range<T: Dated + Clone>(
    records: &[T],
    interval: &DateInterval,
    is_applied: bool,
) -> Vec<T> {
    if !is_applied || interval.is_unbounded() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| match record.record_date() {
            Some(raw) => interval.contains_raw(raw),
            None => true,
        })
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn source(name: &str, category: Option<&str>, created_at: Option<&str>) -> JobSource {
        let mut src = JobSource::new(name);
        src.category = category.map(str::to_string);
        src.created_at = created_at.map(str::to_string);
        src
    }

    fn selected(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_selection_returns_input_unchanged() {
        let records = vec![
            source("Referral", Some("Organic"), None),
            source("Google Ads", Some("Paid"), None),
        ];

        let filtered = filter_by_category(&records, &[]);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "Referral");
        assert_eq!(filtered[1].name, "Google Ads");
    }

    #[test]
    fn test_category_membership() {
        let records = vec![
            source("Referral", Some("Organic"), None),
            source("Google Ads", Some("Paid"), None),
            source("Billboard", Some("Offline"), None),
        ];

        let filtered = filter_by_category(&records, &selected(&["Paid", "Offline"]));
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Google Ads", "Billboard"]);
    }

    #[test]
    fn test_uncategorized_needs_sentinel() {
        let records = vec![
            source("Referral", Some("Organic"), None),
            source("Walk-in", None, None),
        ];

        // Without the sentinel, the uncategorized record is dropped
        let filtered = filter_by_category(&records, &selected(&["Organic"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Referral");

        // With the sentinel, it is kept
        let filtered = filter_by_category(&records, &selected(&["Organic", OTHERS]));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sentinel_label_differs_per_entity() {
        assert_eq!(Technician::uncategorized_label(), UNCATEGORIZED);
        assert_eq!(JobSource::uncategorized_label(), OTHERS);
    }

    #[test]
    fn test_date_filter_noop_when_not_applied() {
        let records = vec![
            source("A", None, Some("2020-01-01")),
            source("B", None, Some("2024-01-01")),
        ];
        let interval = DateInterval::since(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());

        let filtered = filter_by_date_range(&records, &interval, false);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_date_filter_noop_when_unbounded() {
        let records = vec![source("A", None, Some("2020-01-01"))];

        let filtered = filter_by_date_range(&records, &DateInterval::all_time(), true);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_date_filter_inclusive_bounds() {
        let records = vec![
            source("Before", None, Some("2023-12-31")),
            source("Start", None, Some("2024-01-01")),
            source("Mid", None, Some("2024-01-15")),
            source("End", None, Some("2024-01-31")),
            source("After", None, Some("2024-02-01")),
        ];
        let interval = DateInterval::between(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );

        let filtered = filter_by_date_range(&records, &interval, true);
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Start", "Mid", "End"]);
    }

    #[test]
    fn test_dateless_record_passes_malformed_is_excluded() {
        let records = vec![
            source("No Date", None, None),
            source("Bad Date", None, Some("not a date")),
            source("Good", None, Some("2024-06-01")),
        ];
        let interval = DateInterval::since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let filtered = filter_by_date_range(&records, &interval, true);
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["No Date", "Good"]);
    }
}
