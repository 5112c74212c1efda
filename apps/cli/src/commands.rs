//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use infographic_core::{ProcessRunner, ProgressReporter, RunReport, run_pipeline};
use infographic_shared::{
    AppConfig, NotebookId, RENDERER_HOME_ENV, RunConfig, init_config, load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// create-infographic: generate infographic content from a source document.
#[derive(Parser)]
#[command(
    name = "create-infographic",
    version,
    about = "Generate timelines, mindmaps, briefings and visuals from a source document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full generation pipeline.
    Run(RunArgs),

    /// Delete the notebook created by a previous run.
    Cleanup {
        /// Output directory of the run (default: ./investment-infographic-output).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Notebook ID to delete (defaults to the one saved in the output directory).
        #[arg(long)]
        notebook: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `run`.
#[derive(clap::Args)]
pub(crate) struct RunArgs {
    /// Output directory (default: ./investment-infographic-output).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Source document (default: investment-process.md next to the executable).
    #[arg(long)]
    source: Option<PathBuf>,

    /// Skip audio overview generation.
    #[arg(long)]
    skip_audio: bool,

    /// Render diagrams and slide decks after content generation.
    #[arg(long)]
    visuals: bool,

    /// Renderer installation directory.
    #[arg(long, env = RENDERER_HOME_ENV)]
    renderer_dir: Option<PathBuf>,

    /// Seconds to wait for source processing (default: 5).
    #[arg(long)]
    processing_delay: Option<u64>,

    /// Print the run report as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!(
        "infographic_core={level},infographic_shared={level},create_infographic={level}"
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args).await,
        Command::Cleanup {
            output_dir,
            notebook,
        } => cmd_cleanup(output_dir, notebook).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

async fn cmd_run(args: RunArgs) -> Result<()> {
    let app = load_config()?;

    let source_path = match args.source {
        Some(path) => path,
        None => default_source_path(&app)?,
    };

    let mut config = RunConfig::from_app(&app, source_path);
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(secs) = args.processing_delay {
        config.processing_delay = Duration::from_secs(secs);
    }
    config.skip_audio = args.skip_audio;
    config.render_visuals = args.visuals;
    config.renderer_dir = args.renderer_dir;

    info!(
        output_dir = %config.output_dir.display(),
        source = %config.source_path.display(),
        skip_audio = config.skip_audio,
        visuals = config.render_visuals,
        "starting infographic generation"
    );

    let reporter = CliProgress::new();
    let report = match run_pipeline(&config, &ProcessRunner, &reporter).await {
        Ok(report) => report,
        Err(failure) => {
            reporter.abandon();
            return Err(eyre!(failure));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            infographic_core::report::render_summary(&report, &config.tool)
        );
    }

    Ok(())
}

/// The source document sits next to the running executable unless overridden.
fn default_source_path(app: &AppConfig) -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| eyre!("cannot locate executable: {e}"))?;
    let dir = exe
        .parent()
        .ok_or_else(|| eyre!("executable has no parent directory: {}", exe.display()))?;
    Ok(dir.join(&app.defaults.source_file))
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    fn abandon(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn step(&self, current: usize, total: usize, label: &str) {
        self.spinner.set_message(format!("[{current}/{total}] {label}"));
    }

    fn done(&self, _report: &RunReport) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Other commands
// ---------------------------------------------------------------------------

async fn cmd_cleanup(output_dir: Option<PathBuf>, notebook: Option<String>) -> Result<()> {
    let app = load_config()?;
    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&app.defaults.output_dir));

    let notebook_id = match notebook {
        Some(id) => NotebookId::new(id),
        None => infographic_core::session::read_notebook_id(Path::new(&output_dir))?,
    };

    info!(%notebook_id, "deleting notebook");
    infographic_core::session::delete_session(&ProcessRunner, &app.tool, &notebook_id).await?;
    println!("Deleted notebook {notebook_id}");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "create-infographic",
            "run",
            "--output-dir",
            "/tmp/out",
            "--skip-audio",
            "--visuals",
            "--renderer-dir",
            "/opt/renderer",
        ])
        .expect("parse");

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/out")));
                assert!(args.skip_audio);
                assert!(args.visuals);
                assert_eq!(args.renderer_dir, Some(PathBuf::from("/opt/renderer")));
                assert!(!args.json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cleanup_accepts_explicit_notebook() {
        let cli = Cli::try_parse_from(["create-infographic", "cleanup", "--notebook", "nb-1"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Cleanup { notebook: Some(ref id), .. } if id == "nb-1"
        ));
    }
}
