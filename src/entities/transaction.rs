// 💳 Financial Transaction Entity - ledger rows for the finance view
//
// Only Completed transactions contribute to any total; Pending and Failed
// rows are excluded entirely from aggregation, not zero-weighted.
// The idempotency hash is for import deduplication only - identity is the
// id field.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// TRANSACTION CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    /// Customer payment - adds to realized revenue
    Payment,
    /// Operating expense
    Expense,
    /// Refund - reduces realized revenue (not a separate expense bucket)
    Refund,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Payment => "payment",
            TransactionCategory::Expense => "expense",
            TransactionCategory::Refund => "refund",
        }
    }
}

// ============================================================================
// TRANSACTION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

// ============================================================================
// FINANCIAL TRANSACTION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: String,

    /// Transaction date string (YYYY-MM-DD or MM/DD/YYYY)
    pub date: String,

    pub amount: f64,

    pub category: TransactionCategory,

    pub status: TransactionStatus,

    /// Technician owed a cut of this payment, if any
    #[serde(default)]
    pub technician_name: Option<String>,

    /// Rate used for the technician cut; missing rate means no cut
    #[serde(default)]
    pub technician_rate: Option<f64>,

    /// Whether technician_rate is a percentage (true) or flat (false)
    #[serde(default)]
    pub rate_is_percentage: bool,
}

impl FinancialTransaction {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Compute idempotency hash for import deduplication.
    /// NOTE: dedup key, not identity - identity is `id`.
    pub fn compute_idempotency_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}{}{}{}",
            self.date,
            self.amount,
            self.category.as_str(),
            self.technician_name.as_deref().unwrap_or("")
        ));
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// TESTS
// ============================================================================
