// 📅 Date Handling - Calendar-date parsing + interval membership
// All record dates are stored as strings; comparison happens at
// calendar-date resolution after parsing. Malformed dates never panic:
// they fall back to the epoch sentinel for ordering and fail interval
// membership checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel date for records whose timestamp is missing or unparsable.
/// Such records sort as "oldest possible" instead of raising an error.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Parse a record date string.
///
/// Accepts `YYYY-MM-DD` and `MM/DD/YYYY`. Anything else is the malformed
/// case and returns `None` - callers decide between the epoch sentinel
/// (sorting) and exclusion (interval membership).
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

/// Parse a record date, falling back to the epoch sentinel.
/// Used by sort comparators so unparsable timestamps order as oldest.
pub fn parse_or_epoch(raw: &str) -> NaiveDate {
    parse_record_date(raw).unwrap_or_else(epoch)
}

// ============================================================================
// DATE INTERVAL
// ============================================================================

/// An optional inclusive date interval.
///
/// `from` absent means "unbounded / all time". `from` present without `to`
/// means open-ended upward at the membership level; the date picker in the
/// presentation layer sets `to = from` when the user selects a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateInterval {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateInterval {
    /// Interval covering all time (no bounds).
    pub fn all_time() -> Self {
        DateInterval::default()
    }

    /// Interval from a lower bound, open-ended upward.
    pub fn since(from: NaiveDate) -> Self {
        DateInterval {
            from: Some(from),
            to: None,
        }
    }

    /// Interval with both bounds (inclusive).
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        DateInterval {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Build an interval from raw date strings; malformed bounds are
    /// dropped rather than propagated as errors.
    pub fn from_strings(from: Option<&str>, to: Option<&str>) -> Self {
        DateInterval {
            from: from.and_then(parse_record_date),
            to: to.and_then(parse_record_date),
        }
    }

    /// True when no lower bound is set, i.e. every date is in range.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none()
    }

    /// Inclusive membership check: `date >= from` and, when a `to` bound
    /// exists, `date <= to`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.from {
            None => true,
            Some(from) => {
                if date < from {
                    return false;
                }
                match self.to {
                    Some(to) => date <= to,
                    None => true,
                }
            }
        }
    }

    /// Membership check over a raw date string. A malformed date fails
    /// membership when a bound is set, passes when the interval is
    /// unbounded.
    pub fn contains_raw(&self, raw: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        match parse_record_date(raw) {
            Some(date) => self.contains(date),
            None => false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_record_date("2024-03-15"), Some(d(2024, 3, 15)));
        assert_eq!(parse_record_date("  2024-03-15  "), Some(d(2024, 3, 15)));
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(parse_record_date("03/15/2024"), Some(d(2024, 3, 15)));
        assert_eq!(parse_record_date("12/01/2023"), Some(d(2023, 12, 1)));
    }

    #[test]
    fn test_parse_malformed_date() {
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("   "), None);
        assert_eq!(parse_record_date("not a date"), None);
        assert_eq!(parse_record_date("2024-13-45"), None);
        assert_eq!(parse_record_date("15-03-2024"), None);
    }

    #[test]
    fn test_parse_or_epoch_fallback() {
        assert_eq!(parse_or_epoch("garbage"), epoch());
        assert_eq!(parse_or_epoch("2024-03-15"), d(2024, 3, 15));
    }

    #[test]
    fn test_unbounded_interval_contains_everything() {
        let interval = DateInterval::all_time();
        assert!(interval.is_unbounded());
        assert!(interval.contains(d(1970, 1, 1)));
        assert!(interval.contains(d(2099, 12, 31)));
        assert!(interval.contains_raw("not a date"));
    }

    #[test]
    fn test_bounded_interval_is_inclusive() {
        let interval = DateInterval::between(d(2024, 1, 1), d(2024, 1, 31));

        assert!(interval.contains(d(2024, 1, 1)));
        assert!(interval.contains(d(2024, 1, 31)));
        assert!(interval.contains(d(2024, 1, 15)));
        assert!(!interval.contains(d(2023, 12, 31)));
        assert!(!interval.contains(d(2024, 2, 1)));
    }

    #[test]
    fn test_open_ended_interval() {
        let interval = DateInterval::since(d(2024, 1, 1));

        assert!(interval.contains(d(2024, 1, 1)));
        assert!(interval.contains(d(2030, 6, 1)));
        assert!(!interval.contains(d(2023, 12, 31)));
    }

    #[test]
    fn test_malformed_date_fails_bounded_membership() {
        let interval = DateInterval::since(d(2024, 1, 1));
        assert!(!interval.contains_raw("garbage"));
        assert!(interval.contains_raw("2024-06-01"));
    }

    #[test]
    fn test_interval_from_strings_drops_malformed_bounds() {
        let interval = DateInterval::from_strings(Some("2024-01-01"), Some("bad"));
        assert_eq!(interval.from, Some(d(2024, 1, 1)));
        assert_eq!(interval.to, None);

        let unbounded = DateInterval::from_strings(Some("bad"), None);
        assert!(unbounded.is_unbounded());
    }
}
