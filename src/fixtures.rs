// 📂 Fixture Import - CSV/JSON loaders for dashboard data
//
// The dashboard consumes data wholesale from fixture files: technicians
// and financial transactions as CSV, job sources as JSON (the same payload
// shape the key-value store persists). Loaders are thin serde wrappers;
// validation beyond deserialization happens upstream.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::entities::{FinancialTransaction, JobSource, Technician};

/// Load technicians from a CSV file.
pub fn load_technicians_csv(path: &Path) -> Result<Vec<Technician>> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open technician CSV: {:?}", path))?;
    read_technicians_csv(file)
}

/// Read technicians from any CSV reader (tests feed in-memory bytes).
pub fn read_technicians_csv<R: Read>(reader: R) -> Result<Vec<Technician>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut technicians = Vec::new();

    for result in rdr.deserialize() {
        let technician: Technician = result.context("Failed to deserialize technician row")?;
        technicians.push(technician);
    }

    Ok(technicians)
}

/// Load financial transactions from a CSV file.
pub fn load_transactions_csv(path: &Path) -> Result<Vec<FinancialTransaction>> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open transaction CSV: {:?}", path))?;
    read_transactions_csv(file)
}

/// Read financial transactions from any CSV reader.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<FinancialTransaction>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut transactions = Vec::new();

    for result in rdr.deserialize() {
        let tx: FinancialTransaction = result.context("Failed to deserialize transaction row")?;
        transactions.push(tx);
    }

    Ok(transactions)
}

/// Drop rows whose idempotency hash repeats, keeping the first occurrence.
/// Returns (unique, duplicate_count).
pub fn dedup_transactions(
    transactions: Vec<FinancialTransaction>,
) -> (Vec<FinancialTransaction>, usize) {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    let mut duplicates = 0;

    for tx in transactions {
        if seen.insert(tx.compute_idempotency_hash()) {
            unique.push(tx);
        } else {
            duplicates += 1;
        }
    }

    (unique, duplicates)
}

/// Load job sources from a JSON file.
pub fn load_job_sources_json(path: &Path) -> Result<Vec<JobSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job source fixture: {:?}", path))?;

    serde_json::from_str(&content).context("Failed to parse job source JSON")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PaymentType, TransactionCategory, TransactionStatus};

    const TECH_CSV: &str = "\
id,name,email,phone,specialty,department,category,hire_date,status,payment_type,payment_rate,completed_jobs,cancelled_jobs,total_revenue
tech-1,Ann Rivera,ann@example.com,555-0101,HVAC,Field Ops,Residential,2022-04-01,active,percentage,30.0,42,3,51300.0
tech-2,Bob Ortiz,,,Electrical,,,2023-08-15,on-leave,flat,75.0,10,1,4200.0
";

    const TXN_CSV: &str = "\
id,date,amount,category,status,technician_name,technician_rate,rate_is_percentage
txn-1,2024-05-01,1000.0,payment,completed,Ann Rivera,20.0,true
txn-2,2024-05-02,200.0,expense,completed,,,false
txn-3,2024-05-03,500.0,payment,pending,,,false
";

    #[test]
    fn test_read_technicians_csv() {
        let technicians = read_technicians_csv(TECH_CSV.as_bytes()).unwrap();

        assert_eq!(technicians.len(), 2);
        assert_eq!(technicians[0].name, "Ann Rivera");
        assert_eq!(technicians[0].payment_type, PaymentType::Percentage);
        assert_eq!(technicians[1].email, None);
        assert_eq!(technicians[1].payment_rate, 75.0);
    }

    #[test]
    fn test_read_transactions_csv() {
        let transactions = read_transactions_csv(TXN_CSV.as_bytes()).unwrap();

        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].category, TransactionCategory::Payment);
        assert_eq!(transactions[0].technician_rate, Some(20.0));
        assert!(transactions[0].rate_is_percentage);
        assert_eq!(transactions[2].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_bad_row_reports_context() {
        let csv = "id,date,amount,category,status\ntxn-1,2024-05-01,not-a-number,payment,completed\n";
        let err = read_transactions_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("transaction row"));
    }

    #[test]
    fn test_dedup_transactions() {
        let mut transactions = read_transactions_csv(TXN_CSV.as_bytes()).unwrap();
        // Same date/amount/category/technician as txn-1 = same hash
        let mut dup = transactions[0].clone();
        dup.id = "txn-9".to_string();
        transactions.push(dup);

        let (unique, duplicates) = dedup_transactions(transactions);
        assert_eq!(unique.len(), 3);
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn test_job_sources_json_round_trip() {
        let sources = vec![JobSource::new("Referral"), JobSource::new("Google Ads")];
        let json = serde_json::to_string(&sources).unwrap();

        let parsed: Vec<JobSource> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Referral");
    }
}
