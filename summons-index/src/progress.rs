//! Percent-complete reporting for the host's loading bar.
//!
//! Reporters are not coordinated: two loads running at once both write to
//! the same bar and the last write wins until both finish.

use std::sync::Arc;
use tracing::debug;

/// The host's progress widget.
pub trait ProgressDisplay: Send + Sync {
    fn display(&self, label: &str, pct: u8);
}

/// Progress display that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressDisplay for LogProgress {
    fn display(&self, label: &str, pct: u8) {
        debug!(pct, "{label}");
    }
}

/// Maps discrete steps onto a percentage.
pub struct Progress {
    steps: usize,
    counter: Option<usize>,
    display: Arc<dyn ProgressDisplay>,
}

impl Progress {
    /// `steps` of zero is treated as one.
    pub fn new(steps: usize, display: Arc<dyn ProgressDisplay>) -> Self {
        Self {
            steps: steps.max(1),
            counter: None,
            display,
        }
    }

    /// Moves to the next step and reports `floor(100 * step / steps)`.
    /// The counter is zero-based, so the first call reports 0%.
    pub fn advance(&mut self, label: &str) {
        let step = self.counter.map_or(0, |c| c + 1);
        self.counter = Some(step);
        self.display.display(label, self.percent());
    }

    /// Reports completion.
    pub fn close(&self, label: &str) {
        self.display.display(label, 100);
    }

    /// Percentage for the current step (0 before the first advance).
    pub fn percent(&self) -> u8 {
        let step = self.counter.unwrap_or(0);
        let pct = (100 * step / self.steps).min(100);
        u8::try_from(pct).unwrap_or(100)
    }
}
