//! Audio overview step.
//!
//! Starts an asynchronous audio job on the notebook. The job is not polled;
//! a failure to start it is logged and absorbed.

use tracing::{info, instrument, warn};

use infographic_shared::{NotebookId, ToolConfig};

use crate::outcome::TaskOutcome;
use crate::runner::{CommandRunner, args};

const SUBCOMMAND: &str = "audio-create";
const DESCRIPTION: &str = "Audio overview";

#[instrument(skip_all, fields(notebook_id = %notebook_id))]
pub async fn request_audio<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
    notebook_id: &NotebookId,
) -> TaskOutcome {
    let argv = args([
        SUBCOMMAND,
        notebook_id.as_str(),
        tool.audio_instructions.as_str(),
    ]);

    match runner.run(&tool.program, &argv).await {
        Ok(_) => {
            info!(
                check = %format!("{} audio-get {notebook_id}", tool.program),
                "audio overview creation started"
            );
            TaskOutcome::succeeded(SUBCOMMAND, DESCRIPTION, None)
        }
        Err(e) => {
            warn!(step = DESCRIPTION, error = %e, "audio creation failed, continuing");
            TaskOutcome::failed(SUBCOMMAND, DESCRIPTION, e.to_string())
        }
    }
}
