// Simulated user - one shopper's request loop
//
// Mirrors real behavior: visit the homepage once on start, then run weighted
// search tasks with a randomized think time in between. Each user owns its
// RNG (seeded, so runs are reproducible) and shares only the recorder.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::Result;
use crate::metrics::Recorder;
use crate::scenario::{SEARCH_PATH, SearchTask, search_tasks};

/// Settings for one simulated user.
#[derive(Debug, Clone)]
pub struct UserConfig {
    /// Base URL of the target host.
    pub host: String,
    /// Weighted task executions after the homepage visit.
    pub iterations: u32,
    /// Randomized pause between tasks; `None` disables pausing.
    pub think_time: Option<(Duration, Duration)>,
}

/// One simulated shopper.
pub struct SearchUser {
    http: reqwest::Client,
    cfg: UserConfig,
    recorder: Arc<Recorder>,
    rng: StdRng,
    tasks: Vec<SearchTask>,
}

impl SearchUser {
    pub fn new(cfg: UserConfig, recorder: Arc<Recorder>, seed: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            cfg,
            recorder,
            rng: StdRng::seed_from_u64(seed),
            tasks: search_tasks(),
        })
    }

    /// Runs the user to completion. Request failures are recorded, never
    /// propagated; one slow or broken exchange must not end the simulation.
    pub async fn run(mut self) {
        self.visit("homepage", "/", &[], &[200]).await;
        for iteration in 0..self.cfg.iterations {
            let task = crate::scenario::pick_task(&self.tasks, &mut self.rng).clone();
            debug!(task = task.name, iteration, "running task");
            self.visit(task.name, SEARCH_PATH, task.params, task.accepted)
                .await;
            self.think().await;
        }
    }

    async fn visit(
        &mut self,
        name: &'static str,
        path: &str,
        params: &[(&str, &str)],
        accepted: &[u16],
    ) {
        let url = format!("{}{}", self.cfg.host.trim_end_matches('/'), path);
        let started = Instant::now();
        match self.http.get(&url).query(params).send().await {
            Ok(response) if accepted.contains(&response.status().as_u16()) => {
                self.recorder.record_success(name, started.elapsed());
            }
            Ok(response) => {
                warn!(task = name, status = response.status().as_u16(), "unexpected status");
                self.recorder.record_failure(name);
            }
            Err(err) => {
                warn!(task = name, %err, "request failed");
                self.recorder.record_failure(name);
            }
        }
    }

    async fn think(&mut self) {
        if let Some((min, max)) = self.cfg.think_time {
            let pause = self.rng.gen_range(min.as_millis()..=max.as_millis()) as u64;
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }
    }
}
