// Runner - fans users out on the runtime and merges their metrics

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::Result;
use crate::metrics::{Recorder, Report};
use crate::user::{SearchUser, UserConfig};

/// Default think-time window between tasks.
pub const DEFAULT_THINK_TIME: (Duration, Duration) =
    (Duration::from_secs(1), Duration::from_secs(3));

/// Shape of one load run.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub host: String,
    pub users: u32,
    pub iterations: u32,
    pub think_time: Option<(Duration, Duration)>,
}

impl LoadPlan {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            users: 5,
            iterations: 10,
            think_time: Some(DEFAULT_THINK_TIME),
        }
    }

    #[must_use]
    pub fn with_users(mut self, users: u32) -> Self {
        self.users = users;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn without_think_time(mut self) -> Self {
        self.think_time = None;
        self
    }
}

/// Runs the plan to completion and returns the aggregate report.
///
/// Users are independent tasks sharing nothing but the recorder; a user
/// that panics is logged and the rest of the run still reports.
pub async fn run(plan: &LoadPlan) -> Result<Report> {
    info!(
        host = %plan.host,
        users = plan.users,
        iterations = plan.iterations,
        "load run starting"
    );
    let recorder = Arc::new(Recorder::default());
    let mut users = JoinSet::new();
    for seed in 0..plan.users {
        let user = SearchUser::new(
            UserConfig {
                host: plan.host.clone(),
                iterations: plan.iterations,
                think_time: plan.think_time,
            },
            Arc::clone(&recorder),
            u64::from(seed),
        )?;
        users.spawn(user.run());
    }
    while let Some(joined) = users.join_next().await {
        if let Err(err) = joined {
            warn!(%err, "user task aborted");
        }
    }
    let report = recorder.summary();
    info!(
        requests = report.total_requests(),
        failures = report.total_failures(),
        "load run finished"
    );
    Ok(report)
}
