// search-loadgen CLI - run the search load scenario and report
//
// Exit code mirrors the run outcome: non-zero when the failure ratio
// exceeds the configured threshold.

use std::path::PathBuf;

use clap::Parser;
use search_loadgen::{LoadPlan, runner};

#[derive(Parser)]
#[command(name = "search-loadgen", about = "Weighted load scenario for the search endpoint")]
struct Args {
    /// Target host base URL
    #[arg(long, default_value = "https://www.n11.com")]
    host: String,

    /// Number of concurrent simulated users
    #[arg(long, default_value_t = 5)]
    users: u32,

    /// Weighted task executions per user
    #[arg(long, default_value_t = 10)]
    iterations: u32,

    /// Maximum tolerated failure ratio before a non-zero exit
    #[arg(long, default_value_t = 0.05)]
    fail_threshold: f64,

    /// Write the JSON report to this path as well
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip the randomized 1-3 s think time between tasks
    #[arg(long)]
    no_think_time: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut plan = LoadPlan::new(&args.host)
        .with_users(args.users)
        .with_iterations(args.iterations);
    if args.no_think_time {
        plan = plan.without_think_time();
    }

    let report = runner::run(&plan).await?;
    for task in &report.tasks {
        println!(
            "{:<28} requests={:<5} failures={:<4} p50={}ms p95={}ms max={}ms",
            task.name, task.requests, task.failures, task.p50_ms, task.p95_ms, task.max_ms
        );
    }
    println!(
        "total: {} requests, {} failures ({:.1}%)",
        report.total_requests(),
        report.total_failures(),
        report.failure_ratio() * 100.0
    );

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("report written to {}", path.display());
    }

    if report.failure_ratio() > args.fail_threshold {
        std::process::exit(1);
    }
    Ok(())
}
