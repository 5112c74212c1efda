//! Notebook session management: create the notebook, register the source,
//! wait for ingestion, and remove the notebook on request.

use std::path::Path;
use std::time::Duration;

use tracing::{info, instrument};

use infographic_shared::{
    InfographicError, NOTEBOOK_ID_FILE, NotebookId, Result, SOURCE_ID_FILE, SourceId, ToolConfig,
};

use crate::artifact;
use crate::runner::{CommandRunner, args};

/// Identifiers of the remote notebook and its registered source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub notebook_id: NotebookId,
    pub source_id: SourceId,
}

/// Create a notebook.
///
/// The notebook exists remotely once this returns, whether or not its ID is
/// later saved with [`persist_notebook_id`].
#[instrument(skip_all, fields(title = %tool.notebook_title))]
pub async fn create_session<R: CommandRunner>(runner: &R, tool: &ToolConfig) -> Result<NotebookId> {
    let raw = runner
        .run(&tool.program, &args(["create", tool.notebook_title.as_str()]))
        .await?;
    let notebook_id = NotebookId::new(raw);
    info!(%notebook_id, "notebook created");
    Ok(notebook_id)
}

/// Save the notebook ID to `notebook-id.txt`.
pub fn persist_notebook_id(output_dir: &Path, notebook_id: &NotebookId) -> Result<()> {
    artifact::write_text(&output_dir.join(NOTEBOOK_ID_FILE), notebook_id.as_str())
}

/// Register the source document and persist its ID to `source-id.txt`.
#[instrument(skip_all, fields(notebook_id = %notebook_id, source = %source_path.display()))]
pub async fn register_source<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
    notebook_id: &NotebookId,
    source_path: &Path,
    output_dir: &Path,
) -> Result<SourceId> {
    let argv = vec![
        "add".to_string(),
        notebook_id.to_string(),
        source_path.to_string_lossy().into_owned(),
    ];
    let raw = runner.run(&tool.program, &argv).await?;
    let source_id = SourceId::new(raw);

    artifact::write_text(&output_dir.join(SOURCE_ID_FILE), source_id.as_str())?;
    info!(%source_id, "source registered");

    Ok(source_id)
}

/// Block for a fixed delay so upstream ingestion can catch up.
///
/// Nothing is confirmed: the source may still be processing afterwards.
pub async fn await_processing(delay: Duration) {
    info!(delay_ms = delay.as_millis() as u64, "waiting for source processing");
    tokio::time::sleep(delay).await;
}

/// Delete a notebook with the tool's `rm` subcommand.
#[instrument(skip_all, fields(notebook_id = %notebook_id))]
pub async fn delete_session<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
    notebook_id: &NotebookId,
) -> Result<()> {
    runner
        .run(&tool.program, &args(["rm", notebook_id.as_str()]))
        .await?;
    info!("notebook removed");
    Ok(())
}

/// Read the notebook ID persisted by a previous run.
pub fn read_notebook_id(output_dir: &Path) -> Result<NotebookId> {
    let path = output_dir.join(NOTEBOOK_ID_FILE);
    let raw = std::fs::read_to_string(&path).map_err(|e| InfographicError::io(&path, e))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InfographicError::config(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(NotebookId::new(trimmed))
}
