// 🧰 Job Entity - a unit of work as consumed for aggregation
//
// Jobs carry the monetary amount plus the optional payment-rate fields
// needed to compute the assigned technician's cut. Scheduling, dispatch
// and editing happen upstream; the core only reads.

use serde::{Deserialize, Serialize};

// ============================================================================
// JOB STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Scheduled => "scheduled",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

// ============================================================================
// JOB ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,

    /// Job total in account currency
    pub amount: f64,

    /// Job date string (YYYY-MM-DD or MM/DD/YYYY)
    pub date: String,

    pub status: JobStatus,

    /// Assigned technician, if any
    #[serde(default)]
    pub technician_id: Option<String>,

    /// Rate used to compute the technician's cut for this job.
    /// Missing rate means no cut is owed.
    #[serde(default)]
    pub technician_rate: Option<f64>,

    /// Whether technician_rate is a percentage of the amount (true) or a
    /// flat per-job payout (false)
    #[serde(default)]
    pub rate_is_percentage: bool,
}

impl Job {
    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }

    pub fn is_assigned_to(&self, technician_id: &str) -> bool {
        self.technician_id.as_deref() == Some(technician_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Job {
        Job {
            id: "job-1".to_string(),
            amount: 850.0,
            date: "2024-05-20".to_string(),
            status: JobStatus::Completed,
            technician_id: Some("tech-1".to_string()),
            technician_rate: Some(30.0),
            rate_is_percentage: true,
        }
    }

    #[test]
    fn test_assignment_check() {
        let job = sample();
        assert!(job.is_assigned_to("tech-1"));
        assert!(!job.is_assigned_to("tech-2"));

        let unassigned = Job {
            technician_id: None,
            ..sample()
        };
        assert!(!unassigned.is_assigned_to("tech-1"));
    }

    #[test]
    fn test_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_rate_fields_default_when_missing() {
        let json = r#"{
            "id": "job-2",
            "amount": 120.0,
            "date": "2024-06-01",
            "status": "scheduled"
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.technician_id, None);
        assert_eq!(job.technician_rate, None);
        assert!(!job.rate_is_percentage);
        assert!(!job.is_completed());
    }
}
