//! Visual rendering driver.
//!
//! Feeds already generated content files to the external renderer, producing
//! diagrams and slide decks under `visuals/<subdir>/`. Each task is
//! independent: missing or empty inputs are skipped and renderer failures are
//! logged without stopping the remaining tasks.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use infographic_shared::{InfographicError, RendererConfig, RenderingTask, Result, VISUALS_DIR};

use crate::artifact;
use crate::outcome::TaskOutcome;
use crate::progress::{ProgressReporter, StepCounter};
use crate::runner::CommandRunner;

/// A renderer installation whose entry scripts were found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    pub home: PathBuf,
    pub figure_script: PathBuf,
    pub slides_script: PathBuf,
}

impl Renderer {
    /// Locate both entry scripts under `home`.
    pub fn locate(home: &Path, config: &RendererConfig) -> Result<Self> {
        if !home.is_dir() {
            return Err(InfographicError::renderer(format!(
                "renderer directory not found: {}",
                home.display()
            )));
        }

        let figure_script = home.join(&config.figure_script);
        let slides_script = home.join(&config.slides_script);
        for script in [&figure_script, &slides_script] {
            if !script.is_file() {
                return Err(InfographicError::renderer(format!(
                    "renderer entry script not found: {}",
                    script.display()
                )));
            }
        }

        Ok(Self {
            home: home.to_path_buf(),
            figure_script,
            slides_script,
        })
    }
}

/// Interpreter arguments for one rendering task.
///
/// The slide mode goes to the slide-deck script with a page count; any other
/// mode goes to the figure script as its graph type.
pub fn render_args(
    task: &RenderingTask,
    renderer: &Renderer,
    config: &RendererConfig,
    input: &Path,
    out_dir: &Path,
) -> Vec<String> {
    let input = input.to_string_lossy().into_owned();
    let out_dir = out_dir.to_string_lossy().into_owned();

    if task.is_slides() {
        vec![
            renderer.slides_script.to_string_lossy().into_owned(),
            "--input".into(),
            input,
            "--pages".into(),
            config.slide_pages.to_string(),
            "--style".into(),
            config.slide_style.clone(),
            "--language".into(),
            config.language.clone(),
            "--output-dir".into(),
            out_dir,
        ]
    } else {
        vec![
            renderer.figure_script.to_string_lossy().into_owned(),
            "--input".into(),
            input,
            "--type".into(),
            task.mode.to_string(),
            "--style".into(),
            config.figure_style.clone(),
            "--aspect-ratio".into(),
            config.aspect_ratio.clone(),
            "--language".into(),
            config.language.clone(),
            "--output-dir".into(),
            out_dir,
        ]
    }
}

/// Run every rendering task in order, returning one outcome per task.
#[instrument(skip_all, fields(renderer = %renderer.home.display(), tasks = tasks.len()))]
pub async fn render_visuals<R: CommandRunner>(
    runner: &R,
    renderer: &Renderer,
    config: &RendererConfig,
    output_dir: &Path,
    tasks: &[RenderingTask],
    steps: &mut StepCounter,
    progress: &dyn ProgressReporter,
) -> Vec<TaskOutcome> {
    let mut outcomes = Vec::with_capacity(tasks.len());

    for task in tasks {
        steps.next(progress, &format!("Rendering {}", task.description));

        let input = output_dir.join(task.input);
        if !artifact::is_non_empty_file(&input) {
            info!(input = %input.display(), "input missing or empty, skipping");
            outcomes.push(TaskOutcome::skipped(
                task.mode,
                task.description,
                format!("{} is missing or empty", task.input),
            ));
            continue;
        }

        let outcome = match render_one(runner, renderer, config, output_dir, task, &input).await {
            Ok(dir) => TaskOutcome::succeeded(task.mode, task.description, Some(dir)),
            Err(e) => {
                warn!(step = task.description, error = %e, "rendering failed, continuing");
                TaskOutcome::failed(task.mode, task.description, e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

async fn render_one<R: CommandRunner>(
    runner: &R,
    renderer: &Renderer,
    config: &RendererConfig,
    output_dir: &Path,
    task: &RenderingTask,
    input: &Path,
) -> Result<PathBuf> {
    let out_dir = output_dir.join(VISUALS_DIR).join(task.subdir);
    std::fs::create_dir_all(&out_dir).map_err(|e| InfographicError::io(&out_dir, e))?;

    let argv = render_args(task, renderer, config, input, &out_dir);
    runner.run(&config.interpreter, &argv).await?;
    info!(dir = %out_dir.display(), "rendered");

    Ok(out_dir)
}
