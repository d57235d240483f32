// 🔍 Entity Search Matcher - free-text matching over record fields
//
// Case-insensitive substring containment: a record matches when ANY of
// its configured fields contains the lower-cased query. An empty or
// whitespace-only query matches every record. Absent optional fields are
// skipped, never matched and never an error.

use crate::entities::{JobSource, Technician};

/// Records that expose free-text searchable fields.
pub trait Searchable {
    /// Candidate fields for substring matching. Optional fields that are
    /// absent on the record must simply be left out.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Technician {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.specialty.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        if let Some(phone) = &self.phone {
            fields.push(phone);
        }
        if let Some(department) = &self.department {
            fields.push(department);
        }
        if let Some(category) = &self.category {
            fields.push(category);
        }
        fields
    }
}

impl Searchable for JobSource {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(category) = &self.category {
            fields.push(category);
        }
        if let Some(website) = &self.website {
            fields.push(website);
        }
        fields
    }
}

/// Test whether a free-text query matches a record.
pub fn matches_query<T: Searchable>(record: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Keep the records matching the query, preserving input order.
pub fn filter_by_query<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches_query(*record, query))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
