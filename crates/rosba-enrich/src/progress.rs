//! Progress reporting for upload batches.

use std::path::Path;

use crate::pipeline::{BatchReport, PipelineState};

/// Receives progress events from a running batch.
///
/// Events arrive in order: one `on_start`, then for each file an
/// `on_state_change` to `Running { current, total }` followed by `on_advance`,
/// with `current` going from 1 to `total`, then an `on_state_change` to `Idle`
/// and finally `on_finish`.
pub trait ProgressObserver {
    /// A batch of `total` files is starting.
    fn on_start(&mut self, _total: usize) {}

    /// The pipeline moved to `state`.
    fn on_state_change(&mut self, _state: PipelineState) {}

    /// File number `current` (1-based) is about to be processed.
    fn on_advance(&mut self, _current: usize, _total: usize, _path: &Path) {}

    /// The batch finished and the pipeline is idle again.
    fn on_finish(&mut self, _report: &BatchReport) {}
}

/// Ignores all progress events.
impl ProgressObserver for () {}
