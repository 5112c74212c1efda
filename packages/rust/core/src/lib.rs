//! Pipeline orchestration for the infographic generator.
//!
//! This crate drives the notebook tool and the optional visual renderer:
//! prerequisite checks, session setup, content generation, audio, rendering
//! and reporting, tied together by [`pipeline::run_pipeline`].

pub mod artifact;
pub mod audio;
pub mod generation;
pub mod outcome;
pub mod pipeline;
pub mod prereq;
pub mod progress;
pub mod report;
pub mod runner;
pub mod session;
pub mod visuals;

#[cfg(test)]
pub(crate) mod testing;

pub use outcome::{RunFailure, RunReport, RunState, RunStatus, TaskOutcome, TaskStatus};
pub use pipeline::run_pipeline;
pub use progress::{ProgressReporter, SilentProgress};
pub use runner::{CommandRunner, ProcessRunner};
