// Entity Models - the read-only records the dashboard derives from
//
// Entities are supplied wholesale by fixtures or the job-source store;
// the core only reads them. Every list operation returns a fresh Vec and
// leaves its input untouched.

pub mod job;
pub mod job_source;
pub mod technician;
pub mod transaction;

pub use job::{Job, JobStatus};
pub use job_source::JobSource;
pub use technician::{PaymentType, Technician, TechnicianStatus};
pub use transaction::{FinancialTransaction, TransactionCategory, TransactionStatus};
