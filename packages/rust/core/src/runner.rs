//! External command execution.
//!
//! Every interaction with the notebook tool and the visual renderer goes
//! through [`CommandRunner`], so the pipeline can be driven by a stub in tests.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use infographic_shared::{InfographicError, Result};

/// Runs an external executable and reports a structured outcome.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return its trimmed stdout.
    ///
    /// A non-zero exit status yields [`InfographicError::Execution`] carrying
    /// the trimmed stderr. No retries, no timeout.
    fn run(&self, program: &str, args: &[String]) -> impl Future<Output = Result<String>> + Send;

    /// Whether `program` can be started at all.
    fn probe(&self, program: &str) -> impl Future<Output = bool> + Send;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String> {
        debug!(program, ?args, "running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| InfographicError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(program, status = %output.status, "command failed");
            return Err(InfographicError::execution(program, args, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn probe(&self, program: &str) -> bool {
        // Only a failure to spawn counts; `help` may legitimately exit non-zero.
        match Command::new(program)
            .arg("help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!(program, error = %e, "probe failed");
                false
            }
        }
    }
}

/// Build an owned argument list from string slices.
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
