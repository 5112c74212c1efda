//! End-to-end run: prerequisites → notebook → source → wait → content →
//! audio → visuals → index.

use std::time::Instant;

use chrono::Local;
use tracing::{info, instrument};

use infographic_shared::{
    GENERATION_TASKS, InfographicError, NotebookId, RENDERING_TASKS, RunConfig,
};

use crate::outcome::{RunFailure, RunReport, RunState, TaskOutcome};
use crate::progress::{ProgressReporter, StepCounter};
use crate::report::{self, IndexContext};
use crate::runner::CommandRunner;
use crate::session::{self, Session};
use crate::{artifact, audio, generation, prereq, visuals};

/// Tracks the lifecycle state and the notebook created so far.
#[derive(Debug)]
struct Lifecycle {
    state: RunState,
    notebook_id: Option<NotebookId>,
}

impl Lifecycle {
    fn advance(&mut self, next: RunState) {
        tracing::debug!(from = %self.state, to = %next, "run state");
        self.state = next;
    }

    fn fail(&mut self, error: InfographicError) -> RunFailure {
        let failed_at = self.state;
        self.advance(RunState::Failed);
        tracing::error!(failed_at = %failed_at, error = %error, "run failed");
        RunFailure {
            state: self.state,
            failed_at,
            notebook_id: self.notebook_id.clone(),
            error,
        }
    }
}

/// Number of progress steps a run with `config` announces.
pub fn planned_steps(config: &RunConfig) -> usize {
    let setup = 3; // create, add, wait
    let audio = usize::from(!config.skip_audio);
    let visuals = if config.render_visuals {
        RENDERING_TASKS.len()
    } else {
        0
    };
    setup + GENERATION_TASKS.len() + audio + visuals + 1
}

/// Run the whole pipeline.
///
/// Only prerequisite failures, output directory setup, notebook creation,
/// source registration and the index write are fatal. Every generation,
/// audio and rendering failure is recorded in the returned [`RunReport`].
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub async fn run_pipeline<R: CommandRunner>(
    config: &RunConfig,
    runner: &R,
    progress: &dyn ProgressReporter,
) -> Result<RunReport, RunFailure> {
    let start = Instant::now();
    let mut run = Lifecycle {
        state: RunState::Init,
        notebook_id: None,
    };

    // --- Prerequisites ---
    let prereqs = prereq::check_prerequisites(config, runner)
        .await
        .map_err(|e| run.fail(e))?;
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| run.fail(InfographicError::io(&config.output_dir, e)))?;
    info!(output_dir = %config.output_dir.display(), "output directory ready");
    run.advance(RunState::PrereqsOk);

    let mut steps = StepCounter::new(planned_steps(config));

    // --- Session ---
    steps.next(progress, "Creating notebook");
    let notebook_id = session::create_session(runner, &config.tool)
        .await
        .map_err(|e| run.fail(e))?;
    run.notebook_id = Some(notebook_id.clone());
    run.advance(RunState::SessionCreated);
    session::persist_notebook_id(&config.output_dir, &notebook_id).map_err(|e| run.fail(e))?;

    steps.next(progress, "Adding source");
    let source_id = session::register_source(
        runner,
        &config.tool,
        &notebook_id,
        &config.source_path,
        &config.output_dir,
    )
    .await
    .map_err(|e| run.fail(e))?;
    run.advance(RunState::SourceRegistered);

    steps.next(progress, "Waiting for source processing");
    session::await_processing(config.processing_delay).await;
    run.advance(RunState::Processed);

    let session = Session {
        notebook_id,
        source_id,
    };

    // --- Content ---
    let generation = generation::generate_content(
        runner,
        &config.tool,
        &session,
        &config.output_dir,
        &GENERATION_TASKS,
        &mut steps,
        progress,
    )
    .await;
    run.advance(RunState::ContentGenerated);

    // --- Audio ---
    let audio: Option<TaskOutcome> = if config.skip_audio {
        info!("audio overview skipped");
        None
    } else {
        steps.next(progress, "Creating audio overview");
        let outcome = audio::request_audio(runner, &config.tool, &session.notebook_id).await;
        run.advance(RunState::AudioRequested);
        Some(outcome)
    };

    // --- Visuals ---
    let visuals = match &prereqs.renderer {
        Some(renderer) => {
            let outcomes = visuals::render_visuals(
                runner,
                renderer,
                &config.renderer,
                &config.output_dir,
                &RENDERING_TASKS,
                &mut steps,
                progress,
            )
            .await;
            run.advance(RunState::VisualsRendered);
            outcomes
        }
        None => Vec::new(),
    };

    // --- Report ---
    steps.next(progress, "Writing index");
    let source_name = config
        .source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ctx = IndexContext {
        tool: &config.tool,
        notebook_id: &session.notebook_id,
        source_id: &session.source_id,
        source_name: &source_name,
        generated_at: Local::now(),
        visuals: config.render_visuals,
    };
    let index_path = report::write_index(&config.output_dir, &ctx).map_err(|e| run.fail(e))?;

    let content_files = artifact::content_artifacts(&config.output_dir).map_err(|e| run.fail(e))?;
    let visual_files = artifact::visual_artifacts(&config.output_dir).map_err(|e| run.fail(e))?;
    run.advance(RunState::Reported);

    let report = RunReport {
        output_dir: config.output_dir.clone(),
        notebook_id: session.notebook_id,
        source_id: session.source_id,
        generation,
        audio,
        visuals,
        index_path,
        content_files,
        visual_files,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    run.advance(RunState::Done);
    progress.done(&report);

    info!(
        notebook_id = %report.notebook_id,
        failed = report.failures().len(),
        files = report.content_files.len(),
        elapsed_ms = report.elapsed_ms,
        "run complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
