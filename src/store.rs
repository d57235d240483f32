// 🗄️ Key-Value Store - persistence collaborator for job sources
//
// The dashboard persists job sources across sessions through a plain
// get/set/remove key-value surface. The backend is injectable so tests
// run against an in-memory map while the binaries use SQLite.
//
// Policy: load once on start, persist on every mutation. A payload that
// fails to parse on load surfaces as an empty collection - the core is
// never asked to recover from it.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::entities::{FinancialTransaction, JobSource};

/// Storage key for the persisted job-source collection.
pub const JOB_SOURCES_KEY: &str = "job_sources";

/// Storage key for the persisted transaction ledger.
pub const TRANSACTIONS_KEY: &str = "transactions";

// ============================================================================
// STORAGE BACKEND
// ============================================================================

pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions.
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }
}

/// SQLite-backed key-value table with WAL mode for crash recovery.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store database: {:?}", path))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(SqliteBackend {
            conn: Mutex::new(conn),
        })
    }
}

impl StorageBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ============================================================================
// JOB SOURCE STORE
// ============================================================================

/// Job-source persistence over any backend. Load on start, persist on
/// every mutation.
pub struct JobSourceStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> JobSourceStore<B> {
    pub fn new(backend: B) -> Self {
        JobSourceStore { backend }
    }

    /// Load the persisted collection. A missing key or an unparsable
    /// payload both come back as an empty collection.
    pub fn load(&self) -> Result<Vec<JobSource>> {
        match self.backend.get(JOB_SOURCES_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the whole collection.
    pub fn save(&self, sources: &[JobSource]) -> Result<()> {
        let payload = serde_json::to_string(sources)?;
        self.backend.set(JOB_SOURCES_KEY, &payload)
    }

    /// Insert or replace a source by id, persisting immediately.
    pub fn upsert(&self, source: JobSource) -> Result<Vec<JobSource>> {
        let mut sources = self.load()?;
        match sources.iter_mut().find(|s| s.id == source.id) {
            Some(existing) => *existing = source,
            None => sources.push(source),
        }
        self.save(&sources)?;
        Ok(sources)
    }

    /// Remove a source by id, persisting immediately.
    pub fn remove(&self, id: &str) -> Result<Vec<JobSource>> {
        let mut sources = self.load()?;
        sources.retain(|s| s.id != id);
        self.save(&sources)?;
        Ok(sources)
    }

    /// Drop the whole collection.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(JOB_SOURCES_KEY)
    }
}

// ============================================================================
// TRANSACTION STORE
// ============================================================================

/// Transaction ledger persistence over any backend. Imports merge by
/// idempotency hash: a row whose hash is already in the ledger is
/// skipped, never duplicated, so re-running an import is harmless.
pub struct TransactionStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> TransactionStore<B> {
    pub fn new(backend: B) -> Self {
        TransactionStore { backend }
    }

    /// Load the persisted ledger. A missing key or an unparsable payload
    /// both come back as an empty collection.
    pub fn load(&self) -> Result<Vec<FinancialTransaction>> {
        match self.backend.get(TRANSACTIONS_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the whole ledger.
    pub fn save(&self, transactions: &[FinancialTransaction]) -> Result<()> {
        let payload = serde_json::to_string(transactions)?;
        self.backend.set(TRANSACTIONS_KEY, &payload)
    }

    /// Merge a batch into the ledger, skipping rows whose idempotency
    /// hash is already present (in the ledger or earlier in the batch).
    /// Returns (imported, skipped).
    pub fn import(&self, batch: Vec<FinancialTransaction>) -> Result<(usize, usize)> {
        let mut ledger = self.load()?;
        let mut seen: HashSet<String> = ledger
            .iter()
            .map(|tx| tx.compute_idempotency_hash())
            .collect();

        let mut imported = 0;
        let mut skipped = 0;
        for tx in batch {
            if seen.insert(tx.compute_idempotency_hash()) {
                ledger.push(tx);
                imported += 1;
            } else {
                skipped += 1;
            }
        }

        self.save(&ledger)?;
        Ok((imported, skipped))
    }

    /// Drop the whole ledger.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(TRANSACTIONS_KEY)
    }
}

// ============================================================================
// TESTS
// ============================================================================
