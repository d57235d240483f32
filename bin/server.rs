// Dispatch Board - Web Server
// REST API over the list pipeline and finance roll-up

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use dispatch_board::{
    aggregate_transactions, matches_query, DateInterval, FinancialSummary, FinancialTransaction,
    JobSource, JobSourceStore, ListQuery, SortOption, SqliteBackend, Technician,
};

/// Shared application state - dashboard data is loaded once at startup
/// and served read-only
#[derive(Clone)]
struct AppState {
    technicians: Arc<Vec<Technician>>,
    job_sources: Arc<Vec<JobSource>>,
    transactions: Arc<Vec<FinancialTransaction>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Common list-view query parameters
#[derive(Deserialize, Default)]
struct ListParams {
    search: Option<String>,
    /// Comma-separated category labels; include the sentinel
    /// ("Uncategorized"/"Others") to pull in records without one
    category: Option<String>,
    sort: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::new();

        if let Some(search) = &self.search {
            query.search = search.clone();
        }
        if let Some(category) = &self.category {
            query.categories = category
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(sort) = &self.sort {
            query.sort = SortOption::from_key(sort);
        }

        let interval = DateInterval::from_strings(self.from.as_deref(), self.to.as_deref());
        if !interval.is_unbounded() {
            query.date_filter_applied = true;
            query.interval = interval;
        }

        query
    }

    fn interval(&self) -> DateInterval {
        DateInterval::from_strings(self.from.as_deref(), self.to.as_deref())
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/technicians - List technicians through the full pipeline
async fn list_technicians(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let result = params.to_query().apply(&state.technicians);
    (StatusCode::OK, Json(ApiResponse::ok(result)))
}

/// GET /api/technicians/:name - Look up a technician by (urlencoded) name
async fn get_technician(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let decoded_name = urlencoding::decode(&name)
        .unwrap_or_else(|_| name.clone().into())
        .into_owned();

    let found = state
        .technicians
        .iter()
        .find(|tech| matches_query(*tech, &decoded_name))
        .cloned();

    match found {
        Some(tech) => (StatusCode::OK, Json(ApiResponse::ok(Some(tech)))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<Technician>>::ok(None)),
        )
            .into_response(),
    }
}

/// GET /api/job-sources - List job sources through the full pipeline
async fn list_job_sources(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let result = params.to_query().apply(&state.job_sources);
    (StatusCode::OK, Json(ApiResponse::ok(result)))
}

/// GET /api/finance/summary - Roll up completed transactions in a window
async fn finance_summary(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let summary: FinancialSummary =
        aggregate_transactions(&state.transactions, &params.interval());
    (StatusCode::OK, Json(ApiResponse::ok(summary)))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Dispatch Board - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Load dashboard data once at startup
    let technicians_path = std::path::Path::new("fixtures/technicians.csv");
    let transactions_path = std::path::Path::new("fixtures/transactions.csv");

    if !technicians_path.exists() || !transactions_path.exists() {
        eprintln!("❌ Fixtures not found!");
        eprintln!("   Expected fixtures/technicians.csv and fixtures/transactions.csv");
        std::process::exit(1);
    }

    let technicians =
        dispatch_board::load_technicians_csv(technicians_path).expect("Failed to load technicians");
    let (transactions, _) = dispatch_board::dedup_transactions(
        dispatch_board::load_transactions_csv(transactions_path)
            .expect("Failed to load transactions"),
    );

    let store = JobSourceStore::new(
        SqliteBackend::open(std::path::Path::new("dispatch-board.db"))
            .expect("Failed to open store"),
    );
    let job_sources = store.load().expect("Failed to load job sources");

    println!(
        "✓ Loaded {} technicians, {} job sources, {} transactions",
        technicians.len(),
        job_sources.len(),
        transactions.len()
    );

    let state = AppState {
        technicians: Arc::new(technicians),
        job_sources: Arc::new(job_sources),
        transactions: Arc::new(transactions),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/technicians", get(list_technicians))
        .route("/technicians/:name", get(get_technician))
        .route("/job-sources", get(list_job_sources))
        .route("/finance/summary", get(finance_summary))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   Technicians: http://localhost:3000/api/technicians?sort=revenue-high");
    println!("   Finance:     http://localhost:3000/api/finance/summary?from=2024-01-01");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
