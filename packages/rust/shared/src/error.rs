//! Error types for the infographic generator.
//!
//! Library crates use [`InfographicError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all infographic operations.
#[derive(Debug, thiserror::Error)]
pub enum InfographicError {
    /// The primary notebook tool could not be invoked at all.
    #[error("{program} is not installed.\n{hint}")]
    MissingTool { program: String, hint: String },

    /// The source document does not exist.
    #[error("source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    /// Visual rendering was requested but the renderer is not usable.
    #[error("renderer error: {message}")]
    Renderer { message: String },

    /// An external command ran and exited with a non-zero status.
    #[error("{command} failed: {stderr}")]
    Execution { command: String, stderr: String },

    /// An external command could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InfographicError>;

impl InfographicError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a renderer error from any displayable message.
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an execution error from a program, its arguments and raw stderr.
    pub fn execution(program: &str, args: &[String], stderr: &str) -> Self {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        Self::Execution {
            command,
            stderr: stderr.trim().to_string(),
        }
    }

    /// True for failures detected before any remote state exists.
    pub fn is_fatal_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingTool { .. } | Self::MissingSource { .. } | Self::Renderer { .. }
        )
    }
}
