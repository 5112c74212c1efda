//! Test doubles shared by the pipeline module tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use infographic_shared::{AppConfig, InfographicError, Result, RunConfig};

use crate::runner::CommandRunner;

pub(crate) const STUB_NOTEBOOK_ID: &str = "nb-stub-0001";
pub(crate) const STUB_SOURCE_ID: &str = "src-stub-0001";

/// Recording [`CommandRunner`] with scripted failures.
///
/// The notebook tool answers `create` and `add` with fixed IDs and every other
/// subcommand with a small Markdown document. Renderer invocations (anything
/// carrying `--output-dir`) drop a file into the requested directory.
#[derive(Default)]
pub(crate) struct StubRunner {
    calls: Mutex<Vec<Vec<String>>>,
    failing: Vec<String>,
    unavailable: bool,
}

impl StubRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation that has an argument equal to, or ending with, `needle`.
    pub(crate) fn failing_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    /// Make `probe` report the program as missing.
    pub(crate) fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Every invocation as `[program, args...]`.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of tool invocations whose first argument is `subcommand`.
    pub(crate) fn count(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.get(1).map(String::as_str) == Some(subcommand))
            .count()
    }

    /// Number of invocations of `program`.
    pub(crate) fn count_program(&self, program: &str) -> usize {
        self.calls().iter().filter(|c| c[0] == program).count()
    }
}

impl CommandRunner for StubRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().unwrap().push(call);

        let fails = args.iter().any(|a| {
            self.failing
                .iter()
                .any(|needle| a == needle || a.ends_with(needle.as_str()))
        });
        if fails {
            return Err(InfographicError::execution(program, args, "stubbed failure\n"));
        }

        if let Some(pos) = args.iter().position(|a| a == "--output-dir") {
            let out = Path::new(&args[pos + 1]);
            let file = if args.iter().any(|a| a == "--pages") {
                "deck.pptx"
            } else {
                "figure.svg"
            };
            std::fs::write(out.join(file), "rendered").map_err(|e| InfographicError::io(out, e))?;
            return Ok(format!("wrote {file}"));
        }

        let sub = args.first().map(String::as_str).unwrap_or_default();
        Ok(match sub {
            "create" => STUB_NOTEBOOK_ID.to_string(),
            "add" => STUB_SOURCE_ID.to_string(),
            "audio-create" => "Audio overview creation started".to_string(),
            "rm" => String::new(),
            other => format!("# {other}\n\nGenerated content for {other}."),
        })
    }

    async fn probe(&self, _program: &str) -> bool {
        !self.unavailable
    }
}

/// Collects formatted log output for assertions on emitted events.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Plain-text subscriber writing events at `level` and above into this buffer.
    pub(crate) fn subscriber(
        &self,
        level: tracing::Level,
    ) -> impl tracing::Subscriber + Send + Sync + use<> {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(level)
            .with_ansi(false)
            .with_target(false)
            .finish()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Fresh scratch directory with a source document in it.
pub(crate) struct Scratch {
    pub root: PathBuf,
}

impl Scratch {
    pub(crate) fn new(label: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "infographic-{label}-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(
            root.join("investment-process.md"),
            "# Investment Process\n\n1. Goals\n2. Research\n",
        )
        .unwrap();
        Self { root }
    }

    pub(crate) fn source(&self) -> PathBuf {
        self.root.join("investment-process.md")
    }

    pub(crate) fn output_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Run config with no processing delay, writing under this scratch dir.
    pub(crate) fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::from_app(&AppConfig::default(), self.source());
        config.output_dir = self.output_dir();
        config.processing_delay = std::time::Duration::ZERO;
        config
    }

    /// Renderer install dir containing both entry scripts.
    pub(crate) fn renderer_dir(&self, config: &RunConfig) -> PathBuf {
        let dir = self.root.join("renderer");
        for script in [&config.renderer.figure_script, &config.renderer.slides_script] {
            let path = dir.join(script);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "# entry script\n").unwrap();
        }
        dir
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}
