//! External Model Trigger - invoke-and-capture collaborator contract
//!
//! The inference models are external processes: the dashboard asks the
//! service to start one, the process runs, observes, and feeds records
//! back through the ingestion API on its own. The contract here is only
//! "run it and hand back what it printed" - the trigger never touches the
//! log store, and aggregation reads whatever has already been ingested
//! regardless of whether a trigger is still running.

use crate::{Error, Result};
use std::future::Future;
use tokio::process::Command;
use tracing::{error, info};

/// Pluggable external model collaborator.
pub trait ModelTrigger: Send + Sync {
    /// Run the external model process and capture its stdout.
    ///
    /// A failure to launch, a non-zero exit, or stderr output is an
    /// [`Error::Trigger`] carrying the captured text.
    fn invoke(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Trigger that launches a configured command.
#[derive(Debug, Clone)]
pub struct ScriptTrigger {
    program: String,
    args: Vec<String>,
}

impl ScriptTrigger {
    /// Create a trigger for `program` with fixed arguments.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Convenience constructor for the `python <script>` shape the
    /// reference models use.
    #[must_use]
    pub fn python_script(script_path: impl Into<String>) -> Self {
        Self::new("python", vec![script_path.into()])
    }
}

impl ModelTrigger for ScriptTrigger {
    async fn invoke(&self) -> Result<String> {
        info!(program = %self.program, "invoking external model");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| Error::Trigger(format!("failed to launch {}: {e}", self.program)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!(status = %output.status, "model process failed");
            return Err(Error::Trigger(format!(
                "model exited with {}: {}",
                output.status,
                if stderr.is_empty() { &stdout } else { &stderr }
            )));
        }
        // stderr output counts as failure even on exit 0, matching the
        // dashboard's original trigger semantics
        if !stderr.trim().is_empty() {
            error!(stderr = %stderr.trim(), "model process wrote to stderr");
            return Err(Error::Trigger(stderr));
        }

        info!(bytes = stdout.len(), "model completed");
        Ok(stdout)
    }
}
