//! Shared types, error model, and configuration for the infographic generator.
//!
//! This crate is the foundation depended on by the core and CLI crates.
//! It provides:
//! - [`InfographicError`]: the unified error type
//! - Domain types ([`NotebookId`], [`SourceId`], [`GenerationTask`], [`RenderingTask`])
//! - Configuration ([`AppConfig`], [`RunConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, RENDERER_HOME_ENV, RendererConfig, RunConfig, ToolConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, renderer_api_key_present,
};
pub use error::{InfographicError, Result};
pub use types::{
    GENERATION_TASKS, GenerationTask, INDEX_FILE, NOTEBOOK_ID_FILE, NotebookId, OutputArtifact,
    RENDERING_TASKS, RenderingTask, SLIDE_MODE, SOURCE_ID_FILE, SourceId, VISUAL_EXTENSIONS,
    VISUALS_DIR,
};
