//! Propagation and per-tick metrics.
//!
//! [`PropagationStats`] counts the work one propagation chain did;
//! [`StepMetrics`] wraps the summed stats of one board tick with timing.

use gatesim_core::TickId;

/// Work done by one or more propagation chains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Socket state changes committed (equality-guarded no-ops excluded).
    pub socket_changes: u64,
    /// Connection broadcasts that changed the connection's state.
    pub broadcasts: u64,
    /// Component `update` calls.
    pub component_updates: u64,
    /// Deepest component-update nesting reached (recursive mode).
    pub max_depth: usize,
    /// Longest the work queue got (queued mode).
    pub peak_queue: usize,
}

impl PropagationStats {
    /// Fold `other` into `self`: counters add, peaks take the maximum.
    pub fn absorb(&mut self, other: &PropagationStats) {
        self.socket_changes += other.socket_changes;
        self.broadcasts += other.broadcasts;
        self.component_updates += other.component_updates;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.peak_queue = self.peak_queue.max(other.peak_queue);
    }

    /// Whether no socket changed.
    pub fn is_quiet(&self) -> bool {
        self.socket_changes == 0
    }
}

/// Metrics collected during a single board tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// The tick these metrics describe.
    pub tick: TickId,
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Interactive components polled.
    pub interactive_polled: u32,
    /// Propagation work summed over every polled component.
    pub propagation: PropagationStats,
}
