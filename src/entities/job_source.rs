// 📣 Job Source Entity - acquisition channel with performance counters
//
// A job source is where work comes from (referral program, ad campaign,
// partner website). Sources carry aggregate counters maintained upstream;
// this entity only exposes them for filtering, sorting and display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSource {
    pub id: String,

    pub name: String,

    /// Channel category; sources without one fall into the "Others"
    /// bucket during category filtering
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    /// Creation date string (YYYY-MM-DD or MM/DD/YYYY)
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub total_jobs: i64,

    #[serde(default)]
    pub total_revenue: f64,
}

impl JobSource {
    pub fn new(name: &str) -> Self {
        JobSource {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: None,
            website: None,
            created_at: None,
            total_jobs: 0,
            total_revenue: 0.0,
        }
    }

    /// Average revenue per job; zero when the source has no jobs yet
    pub fn revenue_per_job(&self) -> f64 {
        if self.total_jobs <= 0 {
            0.0
        } else {
            self.total_revenue / self.total_jobs as f64
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_has_uuid_and_zero_counters() {
        let source = JobSource::new("Referral Program");

        assert!(!source.id.is_empty());
        assert_eq!(source.name, "Referral Program");
        assert_eq!(source.total_jobs, 0);
        assert_eq!(source.total_revenue, 0.0);
        assert_eq!(source.category, None);
    }

    #[test]
    fn test_revenue_per_job() {
        let mut source = JobSource::new("Google Ads");
        assert_eq!(source.revenue_per_job(), 0.0);

        source.total_jobs = 4;
        source.total_revenue = 1000.0;
        assert_eq!(source.revenue_per_job(), 250.0);
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"{"id": "src-1", "name": "Yard Sign"}"#;
        let source: JobSource = serde_json::from_str(json).unwrap();

        assert_eq!(source.name, "Yard Sign");
        assert_eq!(source.website, None);
        assert_eq!(source.created_at, None);
        assert_eq!(source.total_jobs, 0);
    }
}
