//! Test-only builders and runners that replay queued outcomes.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::command::TargetCommand;
use crate::io::builder::{BuildFailed, BuildFailure, Builder};
use crate::io::target::{RunOutcome, RunOutput, TargetRunner};

/// Builder that succeeds or fails according to a queue.
///
/// Once the queue is drained every further build succeeds.
pub struct ScriptedBuilder {
    outcomes: RefCell<VecDeque<bool>>,
    calls: Cell<u32>,
}

impl ScriptedBuilder {
    pub fn new(outcomes: Vec<bool>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            calls: Cell::new(0),
        }
    }

    pub fn always_ok() -> Self {
        Self::new(Vec::new())
    }

    /// Number of times `build` was invoked.
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Builder for ScriptedBuilder {
    fn build(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        let ok = self.outcomes.borrow_mut().pop_front().unwrap_or(true);
        if ok {
            Ok(())
        } else {
            Err(BuildFailed {
                command: "scripted".to_string(),
                failure: BuildFailure::Exit(Some(1)),
            }
            .into())
        }
    }
}

/// One queued target run.
#[derive(Debug, Clone)]
pub enum ScriptedRun {
    Completed { text: String, exit_code: i32 },
    LaunchFailed,
}

impl ScriptedRun {
    /// A run that prints `text` and exits 0.
    pub fn output(text: &str) -> Self {
        Self::exit_with(text, 0)
    }

    pub fn exit_with(text: &str, exit_code: i32) -> Self {
        Self::Completed {
            text: text.to_string(),
            exit_code,
        }
    }
}

/// Runner that replays queued runs and records every command it receives.
///
/// Once the queue is drained every further run fails to launch, as if the
/// target binary had disappeared.
pub struct ScriptedRunner {
    runs: RefCell<VecDeque<ScriptedRun>>,
    commands: RefCell<Vec<TargetCommand>>,
}

impl ScriptedRunner {
    pub fn new(runs: Vec<ScriptedRun>) -> Self {
        Self {
            runs: RefCell::new(runs.into()),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> Vec<TargetCommand> {
        self.commands.borrow().clone()
    }
}

impl TargetRunner for ScriptedRunner {
    fn run(&self, command: &TargetCommand) -> Result<RunOutcome> {
        self.commands.borrow_mut().push(command.clone());
        let outcome = match self.runs.borrow_mut().pop_front() {
            Some(ScriptedRun::Completed { text, exit_code }) => RunOutcome::Completed(RunOutput {
                text,
                exit_code: Some(exit_code),
                success: exit_code == 0,
            }),
            Some(ScriptedRun::LaunchFailed) | None => RunOutcome::LaunchFailed,
        };
        Ok(outcome)
    }
}

/// Temporary working directory holding shell scripts and a `meshloop.toml`.
pub struct ScriptDir {
    temp: TempDir,
}

impl ScriptDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write a `meshloop.toml` with the given build and target commands.
    pub fn write_config(&self, build: &[&str], target: &[&str]) -> Result<PathBuf> {
        let contents = format!(
            "[build]\ncommand = {}\n\n[target]\ncommand = {}\n",
            toml_array(build),
            toml_array(target)
        );
        self.write("meshloop.toml", &contents)
    }

    /// Read a file from the directory, or an empty string if it does not exist.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.temp.path().join(name);
        if !path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}

fn toml_array(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("{item:?}")).collect();
    format!("[{}]", quoted.join(", "))
}
