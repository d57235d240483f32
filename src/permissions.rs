// 🔐 Permission Check - who can view which job
//
// Deliberately a plain function over explicit inputs rather than ambient
// current-user state: callers pass the user and the job in.

use serde::{Deserialize, Serialize};

use crate::entities::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dispatcher,
    Technician,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(id: &str, role: Role) -> Self {
        CurrentUser {
            id: id.to_string(),
            role,
        }
    }
}

/// Admins and dispatchers see every job; technicians only see jobs
/// assigned to them (unassigned jobs are invisible to technicians).
pub fn can_view_job(user: &CurrentUser, job: &Job) -> bool {
    match user.role {
        Role::Admin | Role::Dispatcher => true,
        Role::Technician => job.is_assigned_to(&user.id),
    }
}

/// Restrict a job list to what the user may see, preserving order.
pub fn visible_jobs(user: &CurrentUser, jobs: &[Job]) -> Vec<Job> {
    jobs.iter()
        .filter(|job| can_view_job(user, job))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::JobStatus;

    fn job(id: &str, technician_id: Option<&str>) -> Job {
        Job {
            id: id.to_string(),
            amount: 100.0,
            date: "2024-05-01".to_string(),
            status: JobStatus::Scheduled,
            technician_id: technician_id.map(str::to_string),
            technician_rate: None,
            rate_is_percentage: false,
        }
    }

    #[test]
    fn test_admin_and_dispatcher_see_everything() {
        let mine = job("job-1", Some("tech-1"));
        let unassigned = job("job-2", None);

        for role in [Role::Admin, Role::Dispatcher] {
            let user = CurrentUser::new("user-1", role);
            assert!(can_view_job(&user, &mine));
            assert!(can_view_job(&user, &unassigned));
        }
    }

    #[test]
    fn test_technician_sees_only_own_jobs() {
        let user = CurrentUser::new("tech-1", Role::Technician);

        assert!(can_view_job(&user, &job("job-1", Some("tech-1"))));
        assert!(!can_view_job(&user, &job("job-2", Some("tech-2"))));
        assert!(!can_view_job(&user, &job("job-3", None)));
    }

    #[test]
    fn test_visible_jobs_preserves_order() {
        let jobs = vec![
            job("job-1", Some("tech-1")),
            job("job-2", Some("tech-2")),
            job("job-3", Some("tech-1")),
        ];
        let user = CurrentUser::new("tech-1", Role::Technician);

        let visible = visible_jobs(&user, &jobs);
        let ids: Vec<&str> = visible.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job-1", "job-3"]);
    }
}
