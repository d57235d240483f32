// 🔧 Technician Entity - worker with payment terms and job counters
//
// Payment terms drive the profit split in finance::technician_profit:
// - Percentage: technician earns rate% of the job total
// - Flat: technician earns the rate verbatim, per job, regardless of size
// - Hourly: paid outside the per-job split (no cut computed here)

use serde::{Deserialize, Serialize};

// ============================================================================
// TECHNICIAN STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechnicianStatus {
    Active,
    Inactive,
    OnLeave,
}

impl TechnicianStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicianStatus::Active => "active",
            TechnicianStatus::Inactive => "inactive",
            TechnicianStatus::OnLeave => "on-leave",
        }
    }
}

// ============================================================================
// PAYMENT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Cut computed as a fraction of the job total
    Percentage,
    /// Fixed payout per job, independent of job value
    Flat,
    /// Paid by the hour; no per-job cut
    Hourly,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Percentage => "percentage",
            PaymentType::Flat => "flat",
            PaymentType::Hourly => "hourly",
        }
    }
}

// ============================================================================
// TECHNICIAN ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,

    pub name: String,

    /// Contact fields are optional - search skips them when absent
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    pub specialty: String,

    #[serde(default)]
    pub department: Option<String>,

    /// Service category; records without one fall into the
    /// "Uncategorized" bucket during category filtering
    #[serde(default)]
    pub category: Option<String>,

    /// Hire date as a date string (YYYY-MM-DD or MM/DD/YYYY)
    pub hire_date: String,

    pub status: TechnicianStatus,

    pub payment_type: PaymentType,

    /// Percentage (0-100) or flat amount, depending on payment_type
    pub payment_rate: f64,

    #[serde(default)]
    pub completed_jobs: i64,

    #[serde(default)]
    pub cancelled_jobs: i64,

    #[serde(default)]
    pub total_revenue: f64,
}

impl Technician {
    /// True when the technician's cut is a fraction of the job total
    pub fn is_percentage_paid(&self) -> bool {
        self.payment_type == PaymentType::Percentage
    }

    pub fn is_active(&self) -> bool {
        self.status == TechnicianStatus::Active
    }

    /// Jobs touched in any state (completed + cancelled)
    pub fn total_jobs(&self) -> i64 {
        self.completed_jobs + self.cancelled_jobs
    }
}

// ============================================================================
// TESTS
// ============================================================================
