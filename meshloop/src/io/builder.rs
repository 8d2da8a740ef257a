//! Builder adapter for the platform build command.
//!
//! The [`Builder`] trait decouples the loop from the actual build tool
//! (`make` or `msbuild`). Tests use scripted builders that succeed or fail on
//! demand without spawning processes.

use std::fmt;
use std::io;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::io::process::{Tee, tee_command};

/// Why the build could not produce a fresh target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildFailure {
    /// The build tool could not be launched.
    NotStarted(String),
    /// The build tool exited unsuccessfully (`None` when killed by a signal).
    Exit(Option<i32>),
}

/// Fatal build error. Carried inside [`anyhow::Error`]; use `downcast_ref` to detect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFailed {
    pub command: String,
    pub failure: BuildFailure,
}

impl fmt::Display for BuildFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            BuildFailure::NotStarted(err) => {
                write!(f, "build command `{}` could not be started: {err}", self.command)
            }
            BuildFailure::Exit(Some(code)) => {
                write!(f, "build command `{}` returned {code}", self.command)
            }
            BuildFailure::Exit(None) => {
                write!(f, "build command `{}` was terminated by a signal", self.command)
            }
        }
    }
}

impl std::error::Error for BuildFailed {}

/// Abstraction over build backends.
pub trait Builder {
    /// Rebuild the target. Any error is fatal to the run.
    fn build(&self) -> Result<()>;
}

/// Builder that runs a configured command and streams its output to stdout.
pub struct CommandBuilder {
    command: Vec<String>,
}

impl CommandBuilder {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn display(&self) -> String {
        self.command.join(" ")
    }

    fn failed(&self, failure: BuildFailure) -> BuildFailed {
        BuildFailed {
            command: self.display(),
            failure,
        }
    }
}

impl Builder for CommandBuilder {
    #[instrument(skip_all, fields(command = %self.display()))]
    fn build(&self) -> Result<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(self
                .failed(BuildFailure::NotStarted("empty build command".to_string()))
                .into());
        };
        info!("building");

        let mut cmd = Command::new(program);
        cmd.args(args);
        let mut stdout = io::stdout().lock();
        let output = match tee_command(&mut cmd, &mut stdout).context("run build command")? {
            Tee::Finished(output) => output,
            Tee::NotStarted(err) => {
                return Err(self.failed(BuildFailure::NotStarted(err.to_string())).into());
            }
        };

        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "build failed");
            return Err(self.failed(BuildFailure::Exit(output.status.code())).into());
        }
        Ok(())
    }
}

/// Build command for the current platform.
pub fn default_build_command() -> Vec<String> {
    if cfg!(windows) {
        vec![
            "msbuild".to_string(),
            "kerava.vcxproj".to_string(),
            "-p:Configuration=Release".to_string(),
        ]
    } else {
        vec!["make".to_string()]
    }
}
