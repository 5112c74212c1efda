//! Application configuration for the infographic generator.
//!
//! User config lives at `~/.infographic/infographic.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{InfographicError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "infographic.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".infographic";

/// Environment variable naming the renderer installation directory.
pub const RENDERER_HOME_ENV: &str = "INFOGRAPHIC_RENDERER_HOME";

// ---------------------------------------------------------------------------
// Config structs (matching infographic.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Notebook tool settings.
    #[serde(default)]
    pub tool: ToolConfig,

    /// Visual renderer settings.
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output directory for generated content.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Source document name, resolved next to the executable.
    #[serde(default = "default_source_file")]
    pub source_file: String,

    /// Seconds to wait after registering the source.
    #[serde(default = "default_processing_delay")]
    pub processing_delay_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            source_file: default_source_file(),
            processing_delay_secs: default_processing_delay(),
        }
    }
}

fn default_output_dir() -> String {
    "./investment-infographic-output".into()
}
fn default_source_file() -> String {
    "investment-process.md".into()
}
fn default_processing_delay() -> u64 {
    5
}

/// `[tool]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Notebook tool executable.
    #[serde(default = "default_program")]
    pub program: String,

    /// Title given to the created notebook.
    #[serde(default = "default_notebook_title")]
    pub notebook_title: String,

    /// Narration instructions passed to `audio-create`.
    #[serde(default = "default_audio_instructions")]
    pub audio_instructions: String,

    /// Shown when the executable cannot be found.
    #[serde(default = "default_install_hint")]
    pub install_hint: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            notebook_title: default_notebook_title(),
            audio_instructions: default_audio_instructions(),
            install_hint: default_install_hint(),
        }
    }
}

fn default_program() -> String {
    "nlm".into()
}
fn default_notebook_title() -> String {
    "Investment Process Infographic".into()
}
fn default_audio_instructions() -> String {
    "Create an engaging overview of the investment process. \
     Walk through each phase from goal-setting to rebalancing. \
     Use a professional but approachable tone suitable for new investors."
        .into()
}
fn default_install_hint() -> String {
    "Install with: go install github.com/tmc/nlm/cmd/nlm@latest".into()
}

/// `[renderer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Interpreter used to run the renderer entry scripts.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Figure/diagram entry script, relative to the renderer directory.
    #[serde(default = "default_figure_script")]
    pub figure_script: String,

    /// Slide-deck entry script, relative to the renderer directory.
    #[serde(default = "default_slides_script")]
    pub slides_script: String,

    /// Name of the env var holding the renderer API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the renderer API endpoint.
    #[serde(default = "default_api_base_env")]
    pub api_base_env: String,

    /// Visual style for figures.
    #[serde(default = "default_figure_style")]
    pub figure_style: String,

    /// Style prompt for slide decks.
    #[serde(default = "default_slide_style")]
    pub slide_style: String,

    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Page count for slide decks.
    #[serde(default = "default_slide_pages")]
    pub slide_pages: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            figure_script: default_figure_script(),
            slides_script: default_slides_script(),
            api_key_env: default_api_key_env(),
            api_base_env: default_api_base_env(),
            figure_style: default_figure_style(),
            slide_style: default_slide_style(),
            aspect_ratio: default_aspect_ratio(),
            language: default_language(),
            slide_pages: default_slide_pages(),
        }
    }
}

fn default_interpreter() -> String {
    "python3".into()
}
fn default_figure_script() -> String {
    "scripts/generate_figure.py".into()
}
fn default_slides_script() -> String {
    "scripts/generate_slides.py".into()
}
fn default_api_key_env() -> String {
    "RENDERER_API_KEY".into()
}
fn default_api_base_env() -> String {
    "RENDERER_API_BASE".into()
}
fn default_figure_style() -> String {
    "flat-minimal".into()
}
fn default_slide_style() -> String {
    "clean corporate, navy and teal palette, large headings".into()
}
fn default_aspect_ratio() -> String {
    "16:9".into()
}
fn default_language() -> String {
    "en".into()
}
fn default_slide_pages() -> u32 {
    8
}

// ---------------------------------------------------------------------------
// Run config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory receiving every artifact.
    pub output_dir: PathBuf,
    /// The source document registered with the notebook.
    pub source_path: PathBuf,
    /// Skip the audio overview step.
    pub skip_audio: bool,
    /// Run the visual rendering driver after content generation.
    pub render_visuals: bool,
    /// Renderer installation directory (from flag or environment).
    pub renderer_dir: Option<PathBuf>,
    /// Blind wait after source registration.
    pub processing_delay: Duration,
    pub tool: ToolConfig,
    pub renderer: RendererConfig,
}

impl RunConfig {
    /// Build a run config from the file config, with renderer disabled and
    /// audio enabled. Callers override fields from CLI flags.
    pub fn from_app(config: &AppConfig, source_path: PathBuf) -> Self {
        Self {
            output_dir: PathBuf::from(&config.defaults.output_dir),
            source_path,
            skip_audio: false,
            render_visuals: false,
            renderer_dir: None,
            processing_delay: Duration::from_secs(config.defaults.processing_delay_secs),
            tool: config.tool.clone(),
            renderer: config.renderer.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.infographic/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| InfographicError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.infographic/infographic.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| InfographicError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        InfographicError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| InfographicError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| InfographicError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| InfographicError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Whether the renderer API key env var is set and non-empty.
pub fn renderer_api_key_present(renderer: &RendererConfig) -> bool {
    matches!(std::env::var(&renderer.api_key_env), Ok(val) if !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("investment-infographic-output"));
        assert!(toml_str.contains("RENDERER_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.processing_delay_secs, 5);
        assert_eq!(parsed.tool.program, "nlm");
        assert_eq!(parsed.renderer.slide_pages, 8);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[tool]
program = "/opt/bin/nlm"

[renderer]
language = "de"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.tool.program, "/opt/bin/nlm");
        assert_eq!(config.tool.notebook_title, "Investment Process Infographic");
        assert_eq!(config.renderer.language, "de");
        assert_eq!(config.renderer.aspect_ratio, "16:9");
        assert_eq!(config.defaults.source_file, "investment-process.md");
    }

    #[test]
    fn run_config_from_app_config() {
        let mut app = AppConfig::default();
        app.defaults.processing_delay_secs = 2;
        let run = RunConfig::from_app(&app, PathBuf::from("doc.md"));
        assert_eq!(run.output_dir, PathBuf::from("./investment-infographic-output"));
        assert_eq!(run.processing_delay, Duration::from_secs(2));
        assert!(!run.skip_audio);
        assert!(!run.render_visuals);
        assert!(run.renderer_dir.is_none());
    }

    #[test]
    fn api_key_detection() {
        let mut renderer = RendererConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        renderer.api_key_env = "INFOGRAPHIC_TEST_NONEXISTENT_KEY_12345".into();
        assert!(!renderer_api_key_present(&renderer));
    }
}
