// 💰 Financial Aggregation - profit splits and transaction roll-ups
//
// Profit split rules:
// - Percentage technicians earn total * (rate / 100)
// - Flat technicians earn the rate verbatim, per job, regardless of size
// - Company profit is total minus technician cut, with no floor at zero:
//   a cut exceeding the job total yields a negative company profit so
//   data-entry errors surface instead of being masked
//
// Roll-ups only count Completed transactions; Pending and Failed rows are
// excluded entirely from every total.

use serde::{Deserialize, Serialize};

use crate::dates::DateInterval;
use crate::entities::{FinancialTransaction, Job, TransactionCategory};

// ============================================================================
// PROFIT SPLIT
// ============================================================================

/// Technician's cut of a job or payment total.
pub fn technician_profit(total: f64, rate: f64, is_percentage: bool) -> f64 {
    if is_percentage {
        total * (rate / 100.0)
    } else {
        rate
    }
}

/// Company's share after the technician cut. No floor at zero.
pub fn company_profit(total: f64, technician_profit: f64) -> f64 {
    total - technician_profit
}

/// Technician payout for a single job, from the job's own rate fields.
/// A job without a rate owes nothing.
pub fn job_payout(job: &Job) -> f64 {
    match job.technician_rate {
        Some(rate) => technician_profit(job.amount, rate, job.rate_is_percentage),
        None => 0.0,
    }
}

// ============================================================================
// TRANSACTION ROLL-UP
// ============================================================================

/// Fixed-shape summary of a transaction window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub company_profit: f64,
    pub technician_payments: f64,
}

/// Roll up completed transactions inside the interval.
///
/// The interval is applied unconditionally here, unlike the optional-apply
/// behavior of the list views. Per category:
/// - Payment: adds to revenue; a present technician rate also accumulates
///   the cut into technician_payments
/// - Expense: adds to expenses
/// - Refund: subtracts from revenue (refunds reduce realized revenue,
///   they are not a separate expense bucket)
pub fn aggregate_transactions(
    transactions: &[FinancialTransaction],
    interval: &DateInterval,
) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for tx in transactions {
        if !tx.is_completed() {
            continue;
        }
        if !interval.contains_raw(&tx.date) {
            continue;
        }

        match tx.category {
            TransactionCategory::Payment => {
                summary.total_revenue += tx.amount;
                if let Some(rate) = tx.technician_rate {
                    summary.technician_payments +=
                        technician_profit(tx.amount, rate, tx.rate_is_percentage);
                }
            }
            TransactionCategory::Expense => {
                summary.total_expenses += tx.amount;
            }
            TransactionCategory::Refund => {
                summary.total_revenue -= tx.amount;
            }
        }
    }

    summary.company_profit =
        summary.total_revenue - summary.total_expenses - summary.technician_payments;
    summary
}

// ============================================================================
// TESTS
// ============================================================================
