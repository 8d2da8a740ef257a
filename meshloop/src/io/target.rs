//! Target runner: launches the preview executable and captures what it reports.
//!
//! The [`TargetRunner`] trait decouples the loop from real processes. Unlike
//! the builder, a non-zero exit is not an error here: the target ending an
//! interactive session is how it normally exits.

use std::io;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::command::TargetCommand;
use crate::io::process::{Tee, tee_command};

/// Output of one target run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Everything the target wrote to stdout (may be empty).
    pub text: String,
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl RunOutput {
    fn from_status(text: String, status: ExitStatus) -> Self {
        Self {
            text,
            exit_code: status.code(),
            success: status.success(),
        }
    }
}

/// Outcome of attempting to run the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunOutput),
    /// The target could not be launched (e.g. the binary is missing).
    LaunchFailed,
}

/// Abstraction over target execution.
pub trait TargetRunner {
    fn run(&self, command: &TargetCommand) -> Result<RunOutcome>;
}

/// Runner that spawns the target and tees its stdout to the terminal.
pub struct ProcessTargetRunner;

impl TargetRunner for ProcessTargetRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run(&self, command: &TargetCommand) -> Result<RunOutcome> {
        info!("launching target");
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        let mut stdout = io::stdout().lock();
        let output = match tee_command(&mut cmd, &mut stdout).context("run target")? {
            Tee::Finished(output) => output,
            Tee::NotStarted(err) => {
                info!(err = %err, "target could not be launched");
                return Ok(RunOutcome::LaunchFailed);
            }
        };

        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "target exited unsuccessfully");
        }
        debug!(bytes = output.stdout.len(), "target finished");
        Ok(RunOutcome::Completed(RunOutput::from_status(
            output.stdout_text(),
            output.status,
        )))
    }
}

/// Target command prefix for the current platform.
pub fn default_target_command() -> Vec<String> {
    if cfg!(windows) {
        vec![".\\Release\\kerava.exe".to_string()]
    } else {
        vec!["./kerava".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(program: &str, args: &[&str]) -> TargetCommand {
        TargetCommand {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    #[test]
    fn missing_target_is_launch_failed() {
        let outcome = ProcessTargetRunner
            .run(&command("./meshloop-missing-target", &["-d"]))
            .expect("run");
        assert_eq!(outcome, RunOutcome::LaunchFailed);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_completed_with_text() {
        let outcome = ProcessTargetRunner
            .run(&command("sh", &["-c", "echo --ticks=3; exit 2"]))
            .expect("run");
        assert_eq!(
            outcome,
            RunOutcome::Completed(RunOutput {
                text: "--ticks=3\n".to_string(),
                exit_code: Some(2),
                success: false,
            })
        );
    }
}
