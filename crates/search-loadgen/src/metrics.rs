// Metrics aggregation
//
// Simulated users operate over independent request/response pairs; ordering
// between them is irrelevant, only aggregate timing matters. The recorder
// collects per-task latencies and failures, the report summarizes them.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Default)]
struct TaskSamples {
    latencies_ms: Vec<u64>,
    failures: u64,
}

/// Shared collector all users record into.
#[derive(Debug, Default)]
pub struct Recorder {
    samples: Mutex<HashMap<&'static str, TaskSamples>>,
}

impl Recorder {
    pub fn record_success(&self, task: &'static str, latency: Duration) {
        let mut samples = self.samples.lock();
        samples
            .entry(task)
            .or_default()
            .latencies_ms
            .push(latency.as_millis() as u64);
    }

    pub fn record_failure(&self, task: &'static str) {
        self.samples.lock().entry(task).or_default().failures += 1;
    }

    /// Snapshot summary of everything recorded so far.
    pub fn summary(&self) -> Report {
        let samples = self.samples.lock();
        let mut tasks: Vec<TaskReport> = samples
            .iter()
            .map(|(name, samples)| {
                let mut sorted = samples.latencies_ms.clone();
                sorted.sort_unstable();
                TaskReport {
                    name: (*name).to_string(),
                    requests: sorted.len() as u64 + samples.failures,
                    failures: samples.failures,
                    min_ms: sorted.first().copied().unwrap_or(0),
                    mean_ms: mean(&sorted),
                    p50_ms: percentile(&sorted, 50.0),
                    p95_ms: percentile(&sorted, 95.0),
                    max_ms: sorted.last().copied().unwrap_or(0),
                }
            })
            .collect();
        tasks.sort_by(|a, b| a.name.cmp(&b.name));
        Report { tasks }
    }
}

/// Latency and failure summary for one task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub name: String,
    pub requests: u64,
    pub failures: u64,
    pub min_ms: u64,
    pub mean_ms: u64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub max_ms: u64,
}

/// Aggregate load-test report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tasks: Vec<TaskReport>,
}

impl Report {
    pub fn total_requests(&self) -> u64 {
        self.tasks.iter().map(|task| task.requests).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.tasks.iter().map(|task| task.failures).sum()
    }

    /// Failed fraction of all requests; 0.0 for an empty run.
    pub fn failure_ratio(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.total_failures() as f64 / total as f64
        }
    }

    pub fn task(&self, name: &str) -> Option<&TaskReport> {
        self.tasks.iter().find(|task| task.name == name)
    }
}

fn mean(sorted: &[u64]) -> u64 {
    if sorted.is_empty() {
        0
    } else {
        sorted.iter().sum::<u64>() / sorted.len() as u64
    }
}

/// Nearest-rank percentile over an ascending-sorted slice.
fn percentile(sorted: &[u64], pct: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
