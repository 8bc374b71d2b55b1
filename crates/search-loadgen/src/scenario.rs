// Search scenario - the weighted task table
//
// Simulates shopper behavior against the storefront search endpoint: heavy
// on product searches, lighter on pagination and filters, with two negative
// tasks probing empty and hostile queries. Weights drive how often each task
// is picked per user iteration.

use rand::Rng;

/// Path of the search endpoint, relative to the host.
pub const SEARCH_PATH: &str = "/arama";

/// One weighted task in the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTask {
    /// Stable name used for metrics grouping.
    pub name: &'static str,
    /// Relative pick weight.
    pub weight: u32,
    /// Query parameters sent to the search endpoint.
    pub params: &'static [(&'static str, &'static str)],
    /// Status codes counted as success. Negative tasks accept the rejection
    /// codes a robust endpoint may answer with.
    pub accepted: &'static [u16],
}

/// The full task table.
pub fn search_tasks() -> Vec<SearchTask> {
    vec![
        SearchTask {
            name: "search_electronics",
            weight: 5,
            params: &[("q", "laptop")],
            accepted: &[200],
        },
        SearchTask {
            name: "search_clothing",
            weight: 3,
            params: &[("q", "tişört")],
            accepted: &[200],
        },
        SearchTask {
            name: "search_with_filters",
            weight: 2,
            params: &[("q", "laptop"), ("srt", "PRICE_LOW")],
            accepted: &[200],
        },
        SearchTask {
            name: "browse_page_two",
            weight: 4,
            params: &[("q", "elektronik"), ("pg", "2")],
            accepted: &[200],
        },
        SearchTask {
            name: "search_empty_query",
            weight: 1,
            params: &[("q", "")],
            accepted: &[200, 400, 404],
        },
        SearchTask {
            name: "search_special_characters",
            weight: 1,
            params: &[("q", "@#$%")],
            accepted: &[200, 400],
        },
    ]
}

/// Picks a task by cumulative weight.
pub fn pick_task<'a, R: Rng>(tasks: &'a [SearchTask], rng: &mut R) -> &'a SearchTask {
    let total: u32 = tasks.iter().map(|task| task.weight).sum();
    let mut roll = rng.gen_range(0..total);
    for task in tasks {
        if roll < task.weight {
            return task;
        }
        roll -= task.weight;
    }
    unreachable!("roll bounded by the weight total")
}
