//! Run outcome model: per-task results, run lifecycle and fatal failures.

use std::path::PathBuf;

use serde::Serialize;

use infographic_shared::{InfographicError, NotebookId, OutputArtifact, SourceId};

// ---------------------------------------------------------------------------
// Per-task outcomes
// ---------------------------------------------------------------------------

/// What happened to a single non-fatal step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// The step ran; `path` is the file it wrote, if any.
    Succeeded { path: Option<PathBuf> },
    /// The step ran and failed; the run continued.
    Failed { message: String },
    /// The step was not attempted.
    Skipped { reason: String },
}

/// Result of one generation, audio or rendering step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    /// Subcommand or rendering mode that identifies the step.
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn succeeded(name: &str, description: &str, path: Option<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: TaskStatus::Succeeded { path },
        }
    }

    pub fn failed(name: &str, description: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: TaskStatus::Failed {
                message: message.into(),
            },
        }
    }

    pub fn skipped(name: &str, description: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: TaskStatus::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, TaskStatus::Failed { .. })
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self.status, TaskStatus::Succeeded { .. })
    }
}

// ---------------------------------------------------------------------------
// Run lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle states of one run, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Init,
    PrereqsOk,
    SessionCreated,
    SourceRegistered,
    Processed,
    ContentGenerated,
    AudioRequested,
    VisualsRendered,
    Reported,
    Done,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::PrereqsOk => "prereqs_ok",
            Self::SessionCreated => "session_created",
            Self::SourceRegistered => "source_registered",
            Self::Processed => "processed",
            Self::ContentGenerated => "content_generated",
            Self::AudioRequested => "audio_requested",
            Self::VisualsRendered => "visuals_rendered",
            Self::Reported => "reported",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal failure that ended the run.
///
/// `state` is always [`RunState::Failed`]; `failed_at` is the last state
/// reached before the failure. When a notebook had already been created its
/// ID is kept so the user can remove it by hand.
#[derive(Debug, thiserror::Error)]
#[error("{error}{}", cleanup_hint(.notebook_id.as_ref()))]
pub struct RunFailure {
    pub state: RunState,
    pub failed_at: RunState,
    pub notebook_id: Option<NotebookId>,
    pub error: InfographicError,
}

fn cleanup_hint(notebook_id: Option<&NotebookId>) -> String {
    match notebook_id {
        Some(id) => format!("\nNotebook ID for cleanup: {id}"),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Overall classification of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every attempted step succeeded.
    Complete,
    /// The run finished with `failed` non-fatal step failures.
    Partial { failed: usize },
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub notebook_id: NotebookId,
    pub source_id: SourceId,
    /// One entry per generation task, in order.
    pub generation: Vec<TaskOutcome>,
    /// `None` when audio was skipped.
    pub audio: Option<TaskOutcome>,
    /// One entry per rendering task; empty when rendering was not requested.
    pub visuals: Vec<TaskOutcome>,
    pub index_path: PathBuf,
    /// Markdown files present in the output directory after the run.
    pub content_files: Vec<OutputArtifact>,
    /// Rendered files present under `visuals/` after the run.
    pub visual_files: Vec<OutputArtifact>,
    pub elapsed_ms: u64,
}

impl RunReport {
    /// All step outcomes in execution order.
    pub fn outcomes(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.generation
            .iter()
            .chain(self.audio.iter())
            .chain(self.visuals.iter())
    }

    pub fn failures(&self) -> Vec<&TaskOutcome> {
        self.outcomes().filter(|o| o.is_failed()).collect()
    }

    pub fn status(&self) -> RunStatus {
        match self.failures().len() {
            0 => RunStatus::Complete,
            failed => RunStatus::Partial { failed },
        }
    }
}
