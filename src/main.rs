// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::Path;

// Use library instead of local modules
use dispatch_board::{
    aggregate_transactions, dedup_transactions, load_job_sources_json, load_transactions_csv,
    DateInterval, JobSourceStore, SqliteBackend, TransactionStore,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("import") => run_import(&args[2..])?,
        Some("summary") => run_summary(&args[2..])?,
        Some("seed-sources") => run_seed_sources(&args[2..])?,
        _ => run_ui_mode()?,
    }

    Ok(())
}

fn run_import(args: &[String]) -> Result<()> {
    println!("📥 Dispatch Board - Import Transactions");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let csv_path = args
        .first()
        .map(String::as_str)
        .unwrap_or("fixtures/transactions.csv");
    let db_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("dispatch-board.db");

    // 1. Load transactions
    println!("\n📂 Loading transactions...");
    let transactions = load_transactions_csv(Path::new(csv_path))?;
    println!("✓ Loaded {} transactions from CSV", transactions.len());

    // 2. Merge into the ledger, skipping rows already imported
    println!("\n💾 Importing into ledger...");
    let store = TransactionStore::new(SqliteBackend::open(Path::new(db_path))?);
    let (imported, skipped) = store.import(transactions)?;

    println!(
        "✓ Imported {} new transactions ({} duplicates skipped)",
        imported, skipped
    );
    println!(
        "✓ Ledger at {} now holds {} transactions",
        db_path,
        store.load()?.len()
    );

    Ok(())
}

fn run_summary(args: &[String]) -> Result<()> {
    println!("💰 Dispatch Board - Financial Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let csv_path = args
        .first()
        .map(String::as_str)
        .unwrap_or("fixtures/transactions.csv");
    let interval = DateInterval::from_strings(
        args.get(1).map(String::as_str),
        args.get(2).map(String::as_str),
    );

    // 1. Load transactions
    println!("\n📂 Loading transactions...");
    let transactions = load_transactions_csv(Path::new(csv_path))?;
    println!("✓ Loaded {} transactions from CSV", transactions.len());

    // 2. Drop duplicate imports
    let (transactions, duplicates) = dedup_transactions(transactions);
    if duplicates > 0 {
        println!("✓ Dropped {} duplicate rows", duplicates);
    }

    // 3. Aggregate
    let summary = aggregate_transactions(&transactions, &interval);

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match (interval.from, interval.to) {
        (Some(from), Some(to)) => println!("Window: {} → {}", from, to),
        (Some(from), None) => println!("Window: {} → open", from),
        _ => println!("Window: all time"),
    }
    println!("  Revenue:              ${:>12.2}", summary.total_revenue);
    println!("  Expenses:             ${:>12.2}", summary.total_expenses);
    println!(
        "  Technician payments:  ${:>12.2}",
        summary.technician_payments
    );
    println!("  Company profit:       ${:>12.2}", summary.company_profit);

    Ok(())
}

fn run_seed_sources(args: &[String]) -> Result<()> {
    println!("🗄️  Dispatch Board - Seed Job Sources");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let json_path = args
        .first()
        .map(String::as_str)
        .unwrap_or("fixtures/job_sources.json");
    let db_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("dispatch-board.db");

    println!("\n📂 Loading job sources...");
    let sources = load_job_sources_json(Path::new(json_path))?;
    println!("✓ Loaded {} job sources from {}", sources.len(), json_path);

    println!("\n💾 Persisting to store...");
    let store = JobSourceStore::new(SqliteBackend::open(Path::new(db_path))?);
    store.save(&sources)?;

    let count = store.load()?.len();
    println!("✓ Store at {} now holds {} sources", db_path, count);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use dispatch_board::load_technicians_csv;

    println!("🖥️  Loading Dispatch Board UI...\n");

    let technicians_path = Path::new("fixtures/technicians.csv");
    let transactions_path = Path::new("fixtures/transactions.csv");

    if !technicians_path.exists() || !transactions_path.exists() {
        eprintln!("❌ Fixtures not found!");
        eprintln!("   Expected fixtures/technicians.csv and fixtures/transactions.csv");
        std::process::exit(1);
    }

    println!("📊 Loading dashboard data...");
    let technicians = load_technicians_csv(technicians_path)?;
    let (transactions, _) = dedup_transactions(load_transactions_csv(transactions_path)?);

    let store = JobSourceStore::new(SqliteBackend::open(Path::new("dispatch-board.db"))?);
    let job_sources = store.load()?;

    println!(
        "✓ {} technicians, {} job sources, {} transactions\n",
        technicians.len(),
        job_sources.len(),
        transactions.len()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(technicians, job_sources, transactions);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin dispatch-server --features server");
    std::process::exit(1);
}
