use serde::{Deserialize, Serialize};

/// Counters collected while a skyline search runs.
///
/// These are diagnostics only; nothing in the search reads them back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of times the dominance-region set was consulted
    pub dominance_checks: u64,
    /// Dequeued entries that turned out promising (index nodes and points)
    pub nodes_visited: u64,
    /// Entries discarded because they fell outside the pruning box
    pub pruned_by_box: u64,
    /// Entries discarded because an accepted skyline point dominated them
    pub pruned_by_dominance: u64,
    /// Entries accepted by the convex hull test without a dominance check
    pub hull_short_circuits: u64,
    /// Entries pushed onto the priority queue
    pub queue_pushes: u64,
    /// Largest queue length observed
    pub peak_queue_len: usize,
    /// Number of accepted skyline points
    pub skyline_size: usize,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dominance_check(&mut self) {
        self.dominance_checks += 1;
    }

    pub fn record_visit(&mut self) {
        self.nodes_visited += 1;
    }

    pub fn record_box_prune(&mut self) {
        self.pruned_by_box += 1;
    }

    pub fn record_dominance_prune(&mut self) {
        self.pruned_by_dominance += 1;
    }

    pub fn record_hull_short_circuit(&mut self) {
        self.hull_short_circuits += 1;
    }

    /// Record a push, given the queue length after it.
    pub fn record_push(&mut self, queue_len: usize) {
        self.queue_pushes += 1;
        self.peak_queue_len = self.peak_queue_len.max(queue_len);
    }

    pub fn record_accept(&mut self) {
        self.skyline_size += 1;
    }
}
