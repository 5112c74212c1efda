//! Reporting stage: the `00-index.md` document and the console summary.
//!
//! The index always lists the full expected file set, whether or not each
//! step actually produced its file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use infographic_shared::{
    GENERATION_TASKS, INDEX_FILE, NotebookId, RENDERING_TASKS, Result, SourceId, ToolConfig,
    VISUALS_DIR,
};

use crate::artifact;
use crate::outcome::{RunReport, RunStatus, TaskStatus};

/// Values interpolated into the index document.
#[derive(Debug, Clone)]
pub struct IndexContext<'a> {
    pub tool: &'a ToolConfig,
    pub notebook_id: &'a NotebookId,
    pub source_id: &'a SourceId,
    /// File name of the source document.
    pub source_name: &'a str,
    pub generated_at: DateTime<Local>,
    /// Whether the visuals section is included.
    pub visuals: bool,
}

/// Render the index document.
pub fn render_index(ctx: &IndexContext<'_>) -> String {
    let program = ctx.tool.program.as_str();
    let nb = ctx.notebook_id;
    let src = ctx.source_id;
    let mut out = String::new();

    out.push_str(&format!(
        "# {} - Generated Content\n\n\
         Generated: {}\n\
         Notebook ID: {nb}\n\
         Source ID: {src}\n\
         Source: {}\n\n",
        ctx.tool.notebook_title,
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S"),
        ctx.source_name,
    ));

    out.push_str("## Generated Files\n\n");
    out.push_str("| File | Description | Infographic Use |\n");
    out.push_str("|------|-------------|-----------------|\n");
    for task in &GENERATION_TASKS {
        out.push_str(&format!(
            "| [{f}]({f}) | {} | {} |\n",
            task.label,
            task.usage,
            f = task.filename,
        ));
    }
    out.push('\n');

    if ctx.visuals {
        out.push_str("## Rendered Visuals\n\n");
        out.push_str("| Directory | Rendered From | Output |\n");
        out.push_str("|-----------|---------------|--------|\n");
        for task in &RENDERING_TASKS {
            out.push_str(&format!(
                "| [{VISUALS_DIR}/{d}/]({VISUALS_DIR}/{d}/) | {} | {} |\n",
                task.input,
                task.description,
                d = task.subdir,
            ));
        }
        out.push('\n');
    }

    out.push_str(DESIGN_GUIDE);

    out.push_str(&format!(
        "## Interactive Exploration\n\n\
         ```bash\n\
         # Chat interactively about the source\n\
         {program} chat {nb}\n\n\
         # Ask specific questions\n\
         {program} generate-chat {nb} \"Compare risk profiles across portfolio types\"\n\n\
         # Generate additional content\n\
         {program} summarize {nb} {src}\n\
         {program} explain {nb} {src}\n\
         ```\n\n\
         ## Cleanup\n\n\
         ```bash\n\
         {program} rm {nb}\n\
         ```\n"
    ));

    out
}

const DESIGN_GUIDE: &str = "\
## Infographic Design Guide

### Timeline Layout
```
Week 1        Weeks 2-3     Week 4        Week 5        Ongoing
  |              |             |             |             |
  v              v             v             v             v
[Goals] --> [Research] --> [Allocate] --> [Execute] --> [Monitor]
                                                          |
                                                    [Rebalance]
```

### Radial Mindmap Layout
- Center: \"Investment Process\"
- Ring 1: Six phases (Goals, Research, Allocate, Execute, Monitor, Rebalance)
- Ring 2: Key activities per phase
- Ring 3: Metrics and deliverables

### Dashboard Layout
Build a single-page layout from the briefing document:
- Top: Process flow diagram
- Middle: Key metrics table (by portfolio type)
- Bottom: Allocation charts and rebalancing triggers

";

/// Write the index document into the output directory.
pub fn write_index(output_dir: &Path, ctx: &IndexContext<'_>) -> Result<PathBuf> {
    let path = output_dir.join(INDEX_FILE);
    artifact::write_text(&path, &render_index(ctx))?;
    info!(path = %path.display(), "index saved");
    Ok(path)
}

/// Render the end-of-run console summary.
pub fn render_summary(report: &RunReport, tool: &ToolConfig) -> String {
    let program = tool.program.as_str();
    let nb = &report.notebook_id;
    let rule = "=".repeat(50);
    let mut out = String::new();

    out.push_str(&format!(
        "\n{rule}\n  {} Generation Complete!\n{rule}\n\n",
        tool.notebook_title
    ));
    out.push_str(&format!("Output:   {}\n", report.output_dir.display()));
    out.push_str(&format!("Notebook: {nb}\n"));
    out.push_str(&format!("Source:   {}\n", report.source_id));

    out.push_str(&format!("\nGenerated {} files:\n", report.content_files.len()));
    for file in &report.content_files {
        out.push_str(&format!(
            "  {} ({} bytes)\n",
            file.name,
            group_thousands(file.size_bytes)
        ));
    }

    if !report.visual_files.is_empty() {
        out.push_str(&format!(
            "\nRendered {} visual files:\n",
            report.visual_files.len()
        ));
        for file in &report.visual_files {
            out.push_str(&format!(
                "  {} ({} bytes)\n",
                file.name,
                group_thousands(file.size_bytes)
            ));
        }
    }

    if let RunStatus::Partial { failed } = report.status() {
        out.push_str(&format!("\nCompleted with {failed} failed step(s):\n"));
        for outcome in report.failures() {
            if let TaskStatus::Failed { message } = &outcome.status {
                out.push_str(&format!("  - {}: {message}\n", outcome.description));
            }
        }
    }

    let mut next = vec![
        format!("Review content in {}/", report.output_dir.display()),
        format!("{program} chat {nb}  (interactive exploration)"),
    ];
    if report.audio.as_ref().is_some_and(|a| a.is_succeeded()) {
        next.push(format!("{program} audio-get {nb}  (audio overview status)"));
    }
    next.push("Design infographic with your preferred tool".to_string());

    out.push_str("\nNext steps:\n");
    for (i, step) in next.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }
    out.push_str(&format!("\nCleanup: {program} rm {nb}\n"));

    out
}

/// Format a byte count with comma separators (`12345` → `12,345`).
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
