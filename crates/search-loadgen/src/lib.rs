//! search-loadgen: weighted load scenario for a storefront search endpoint
//!
//! Simulates shoppers hammering the search module: each user visits the
//! homepage, then runs weighted search tasks (product queries, filtered
//! search, pagination, plus empty-query and hostile-input probes) with a
//! randomized think time. Users are independent request/response loops with
//! no shared mutable state beyond the metrics recorder; only aggregate
//! timing matters.
//!
//! ```ignore
//! use search_loadgen::{LoadPlan, runner};
//!
//! # async fn demo() -> search_loadgen::Result<()> {
//! let plan = LoadPlan::new("https://www.n11.com").with_users(10).with_iterations(20);
//! let report = runner::run(&plan).await?;
//! println!("{} requests, {} failed", report.total_requests(), report.total_failures());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod metrics;
pub mod runner;
pub mod scenario;
pub mod user;

pub use error::{Error, Result};
pub use metrics::{Recorder, Report, TaskReport};
pub use runner::{DEFAULT_THINK_TIME, LoadPlan};
pub use scenario::{SEARCH_PATH, SearchTask, pick_task, search_tasks};
pub use user::{SearchUser, UserConfig};
