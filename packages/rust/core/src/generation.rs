//! Content generation driver.
//!
//! Runs each [`GenerationTask`] against the notebook in order and writes the
//! tool's output verbatim to the task's file. A failing task is logged and
//! skipped; it never aborts the run.

use std::path::Path;

use tracing::{info, instrument, warn};

use infographic_shared::{GenerationTask, Result, ToolConfig};

use crate::artifact;
use crate::outcome::TaskOutcome;
use crate::progress::{ProgressReporter, StepCounter};
use crate::runner::CommandRunner;
use crate::session::Session;

/// Argument list for one task: subcommand, notebook ID, then the source ID
/// when the task needs it.
pub fn task_args(task: &GenerationTask, session: &Session) -> Vec<String> {
    let mut argv = vec![task.subcommand.to_string(), session.notebook_id.to_string()];
    if task.needs_source {
        argv.push(session.source_id.to_string());
    }
    argv
}

/// Run every generation task, returning one outcome per task in order.
#[instrument(skip_all, fields(notebook_id = %session.notebook_id, tasks = tasks.len()))]
pub async fn generate_content<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
    session: &Session,
    output_dir: &Path,
    tasks: &[GenerationTask],
    steps: &mut StepCounter,
    progress: &dyn ProgressReporter,
) -> Vec<TaskOutcome> {
    let mut outcomes = Vec::with_capacity(tasks.len());

    for task in tasks {
        steps.next(progress, &format!("Generating {}", task.description));

        let outcome = match run_task(runner, tool, session, output_dir, task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(step = task.description, error = %e, "generation failed, continuing");
                TaskOutcome::failed(task.subcommand, task.description, e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!(succeeded = outcomes.len() - failed, failed, "content generation finished");

    outcomes
}

async fn run_task<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
    session: &Session,
    output_dir: &Path,
    task: &GenerationTask,
) -> Result<TaskOutcome> {
    let text = runner.run(&tool.program, &task_args(task, session)).await?;

    let path = output_dir.join(task.filename);
    artifact::write_text(&path, &text)?;
    info!(path = %path.display(), "saved");

    Ok(TaskOutcome::succeeded(
        task.subcommand,
        task.description,
        Some(path),
    ))
}

#[cfg(test)]
mod tests {
    use infographic_shared::{GENERATION_TASKS, NotebookId, SourceId};

    use super::*;
    use crate::progress::SilentProgress;
    use crate::testing::{Scratch, StubRunner};

    fn session() -> Session {
        Session {
            notebook_id: NotebookId::new("nb-1"),
            source_id: SourceId::new("src-1"),
        }
    }

    #[test]
    fn source_id_only_when_required() {
        let guide = &GENERATION_TASKS[0];
        let timeline = &GENERATION_TASKS[1];
        assert_eq!(task_args(guide, &session()), vec!["generate-guide", "nb-1"]);
        assert_eq!(
            task_args(timeline, &session()),
            vec!["timeline", "nb-1", "src-1"]
        );
    }

    #[tokio::test]
    async fn writes_every_task_output() {
        let scratch = Scratch::new("generation");
        let out = scratch.output_dir();
        std::fs::create_dir_all(&out).unwrap();
        let runner = StubRunner::new();
        let mut steps = StepCounter::new(GENERATION_TASKS.len());

        let outcomes = generate_content(
            &runner,
            &ToolConfig::default(),
            &session(),
            &out,
            &GENERATION_TASKS,
            &mut steps,
            &SilentProgress,
        )
        .await;

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.iter().all(TaskOutcome::is_succeeded));
        let mindmap = std::fs::read_to_string(out.join("03-mindmap.md")).unwrap();
        assert_eq!(mindmap, "# mindmap\n\nGenerated content for mindmap.");
    }

    #[tokio::test]
    async fn failed_task_is_recorded_and_others_continue() {
        let scratch = Scratch::new("generation");
        let out = scratch.output_dir();
        std::fs::create_dir_all(&out).unwrap();
        let runner = StubRunner::new().failing_on("faq");
        let mut steps = StepCounter::new(GENERATION_TASKS.len());

        let outcomes = generate_content(
            &runner,
            &ToolConfig::default(),
            &session(),
            &out,
            &GENERATION_TASKS,
            &mut steps,
            &SilentProgress,
        )
        .await;

        let failed: Vec<_> = outcomes.iter().filter(|o| o.is_failed()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].description, "Frequently asked questions");
        assert!(!out.join("05-faq.md").exists());
        assert!(out.join("06-outline.md").exists());
        assert_eq!(runner.count("outline"), 1);
    }
}
