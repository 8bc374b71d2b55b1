// Integration tests for the load runner against a local search endpoint

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use tokio::task::JoinHandle;

use search_loadgen::{LoadPlan, runner, search_tasks};

struct SearchServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    hits: Arc<AtomicU64>,
}

impl SearchServer {
    /// Serves "/" and "/arama"; empty queries are answered with 400 like the
    /// real storefront.
    async fn start() -> Self {
        let hits = Arc::new(AtomicU64::new(0));
        let app = Router::new()
            .route("/", get(|| async { "storefront" }))
            .route("/arama", get(search))
            .with_state(Arc::clone(&hits));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind search server");
        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Search server failed");
        });
        SearchServer { addr, handle, hits }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn shutdown(self) {
        self.handle.abort();
    }
}

async fn search(
    State(hits): State<Arc<AtomicU64>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    hits.fetch_add(1, Ordering::Relaxed);
    match params.get("q").map(String::as_str) {
        None | Some("") => (StatusCode::BAD_REQUEST, "missing query".to_string()),
        Some(q) => (StatusCode::OK, format!("results for {q}")),
    }
}

#[tokio::test]
async fn run_reports_every_request_without_failures() {
    let server = SearchServer::start().await;
    let plan = LoadPlan::new(&server.url())
        .with_users(3)
        .with_iterations(8)
        .without_think_time();

    let report = runner::run(&plan).await.expect("run completes");

    // 3 homepage visits plus 3 * 8 search tasks, all accepted (the empty
    // query task counts the 400 as success).
    assert_eq!(report.total_requests(), 3 + 3 * 8);
    assert_eq!(report.total_failures(), 0);
    assert_eq!(report.failure_ratio(), 0.0);
    assert_eq!(
        report.task("homepage").expect("homepage recorded").requests,
        3
    );
    assert_eq!(server.hits.load(Ordering::Relaxed), 3 * 8);

    // Every reported task belongs to the scenario table.
    let known: Vec<&str> = search_tasks().iter().map(|task| task.name).collect();
    for task in &report.tasks {
        assert!(
            task.name == "homepage" || known.contains(&task.name.as_str()),
            "unknown task {}",
            task.name
        );
    }
    server.shutdown();
}

#[tokio::test]
async fn run_counts_unexpected_statuses_as_failures() {
    // No /arama route at all: every search task gets a 404, which only the
    // empty-query task accepts.
    let app = Router::new().route("/", get(|| async { "storefront" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    let plan = LoadPlan::new(&format!("http://{addr}"))
        .with_users(2)
        .with_iterations(6)
        .without_think_time();
    let report = runner::run(&plan).await.expect("run completes");

    assert_eq!(report.total_requests(), 2 + 2 * 6);
    assert!(report.total_failures() > 0, "404s must count as failures");
    assert!(report.failure_ratio() > 0.0);
    handle.abort();
}

#[tokio::test]
async fn unreachable_host_records_failures_instead_of_erroring() {
    // Nothing listens here; the run itself must still complete.
    let plan = LoadPlan::new("http://127.0.0.1:9")
        .with_users(1)
        .with_iterations(2)
        .without_think_time();
    let report = runner::run(&plan).await.expect("run completes");
    assert_eq!(report.total_requests(), 3);
    assert_eq!(report.total_failures(), 3);
}
