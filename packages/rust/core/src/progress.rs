//! Progress reporting for the pipeline.

use crate::outcome::RunReport;

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called before each numbered step (`current` is 1-based).
    fn step(&self, current: usize, total: usize, label: &str);
    /// Called when the run completes, fully or partially.
    fn done(&self, report: &RunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn step(&self, _current: usize, _total: usize, _label: &str) {}
    fn done(&self, _report: &RunReport) {}
}

/// Numbers pipeline steps as they are announced.
#[derive(Debug)]
pub struct StepCounter {
    current: usize,
    total: usize,
}

impl StepCounter {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Announce the next step and return its number.
    pub fn next(&mut self, progress: &dyn ProgressReporter, label: &str) -> usize {
        self.current += 1;
        tracing::info!(step = self.current, total = self.total, "{label}");
        progress.step(self.current, self.total, label);
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
