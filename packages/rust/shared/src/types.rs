//! Core domain types: remote identifiers, task descriptors and artifacts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Index document written at the end of every run.
pub const INDEX_FILE: &str = "00-index.md";

/// File holding the notebook ID, written right after creation.
pub const NOTEBOOK_ID_FILE: &str = "notebook-id.txt";

/// File holding the source ID, written right after registration.
pub const SOURCE_ID_FILE: &str = "source-id.txt";

/// Parent directory (inside the output directory) for rendered visuals.
pub const VISUALS_DIR: &str = "visuals";

/// Rendering mode that selects the slide-deck renderer.
pub const SLIDE_MODE: &str = "slide";

/// File extensions recognised as rendered visual output.
pub const VISUAL_EXTENSIONS: &[&str] = &["svg", "png", "pdf", "pptx", "html"];

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Opaque identifier of a remote notebook, as returned by the tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookId(String);

/// Opaque identifier of a source registered with a notebook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

macro_rules! opaque_id {
    ($ty:ident) => {
        impl $ty {
            /// Wrap a raw identifier string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(NotebookId);
opaque_id!(SourceId);

// ---------------------------------------------------------------------------
// Task descriptors
// ---------------------------------------------------------------------------

/// One content generation step against the notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTask {
    /// Output file name inside the output directory.
    pub filename: &'static str,
    /// Tool subcommand producing the content.
    pub subcommand: &'static str,
    /// Human description used in progress and warnings.
    pub description: &'static str,
    /// Short label used in the index table.
    pub label: &'static str,
    /// Suggested infographic use, shown in the index table.
    pub usage: &'static str,
    /// Whether the source ID is passed after the notebook ID.
    pub needs_source: bool,
}

/// Content generation steps, in execution order.
pub const GENERATION_TASKS: [GenerationTask; 6] = [
    GenerationTask {
        filename: "01-overview-guide.md",
        subcommand: "generate-guide",
        description: "Structured overview guide",
        label: "Study guide",
        usage: "Content backbone",
        needs_source: false,
    },
    GenerationTask {
        filename: "02-timeline.md",
        subcommand: "timeline",
        description: "Investment process timeline",
        label: "Process timeline",
        usage: "Timeline / Gantt chart",
        needs_source: true,
    },
    GenerationTask {
        filename: "03-mindmap.md",
        subcommand: "mindmap",
        description: "Interactive process mindmap",
        label: "Mindmap",
        usage: "Radial process diagram",
        needs_source: true,
    },
    GenerationTask {
        filename: "04-briefing-doc.md",
        subcommand: "briefing-doc",
        description: "Executive briefing document",
        label: "Executive briefing",
        usage: "One-page dashboard",
        needs_source: true,
    },
    GenerationTask {
        filename: "05-faq.md",
        subcommand: "faq",
        description: "Frequently asked questions",
        label: "FAQ",
        usage: "Sidebar / callout boxes",
        needs_source: true,
    },
    GenerationTask {
        filename: "06-outline.md",
        subcommand: "outline",
        description: "Detailed content outline",
        label: "Content outline",
        usage: "Hierarchical structure",
        needs_source: true,
    },
];

/// One visual rendering step over an already generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingTask {
    /// Content file (inside the output directory) used as renderer input.
    pub input: &'static str,
    /// Renderer mode; [`SLIDE_MODE`] selects the slide renderer, anything
    /// else is passed to the figure renderer as the graph type.
    pub mode: &'static str,
    /// Subdirectory of `visuals/` receiving the output.
    pub subdir: &'static str,
    /// Human description used in progress and warnings.
    pub description: &'static str,
}

impl RenderingTask {
    pub fn is_slides(&self) -> bool {
        self.mode == SLIDE_MODE
    }
}

/// Visual rendering steps, in execution order.
pub const RENDERING_TASKS: [RenderingTask; 3] = [
    RenderingTask {
        input: "02-timeline.md",
        mode: "roadmap",
        subdir: "roadmap",
        description: "Timeline roadmap diagram",
    },
    RenderingTask {
        input: "03-mindmap.md",
        mode: "architecture",
        subdir: "architecture",
        description: "Mindmap architecture diagram",
    },
    RenderingTask {
        input: "04-briefing-doc.md",
        mode: SLIDE_MODE,
        subdir: "slides",
        description: "Briefing slide deck",
    },
];

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// A file found under the output directory after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArtifact {
    /// Path relative to the output directory (e.g. `visuals/slides/deck.pptx`).
    pub name: String,
    /// Full path on disk.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
}
