//! The build-launch-feedback loop behind `meshloop`.

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::core::command::TargetCommand;
use crate::core::extract::discover;
use crate::core::settings::{Merge, Settings};
use crate::io::builder::Builder;
use crate::io::target::{RunOutcome, TargetRunner};

/// Reason why `run_loop` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStop {
    /// The target could not be launched.
    LaunchFailed,
    /// The target reported neither a camera nor a tick count.
    NothingDiscovered,
    /// The opt-in iteration cap was reached.
    MaxIterations { max_iterations: u32 },
}

/// Summary of a loop invocation. Every stop is a graceful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    /// Number of target launches attempted.
    pub iterations: u32,
    pub stop: LoopStop,
    /// Settings as they stood when the loop stopped.
    pub settings: Settings,
}

/// Loop parameters that do not change between iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Target program followed by any fixed leading arguments.
    pub target_command: Vec<String>,
    /// `None` runs until the target stops reporting settings.
    pub max_iterations: Option<u32>,
}

/// One finished target run, reported to the `on_iteration` callback.
#[derive(Debug)]
pub struct IterationReport<'a> {
    pub iteration: u32,
    pub command: &'a TargetCommand,
    /// Settings after this run's discoveries were merged.
    pub settings: &'a Settings,
}

/// Build, run, and re-run the target until it stops reporting settings.
///
/// Each iteration rebuilds first. A build error aborts the loop and is returned
/// as-is (see [`crate::io::builder::BuildFailed`]). A target that cannot be
/// launched, or whose output carries neither `--camera=` nor `--ticks=`, ends
/// the loop normally.
pub fn run_loop<B: Builder, R: TargetRunner, F: FnMut(&IterationReport<'_>)>(
    builder: &B,
    runner: &R,
    config: &LoopConfig,
    mut settings: Settings,
    mut on_iteration: F,
) -> Result<LoopOutcome> {
    let mut iterations = 0u32;
    loop {
        if let Some(max_iterations) = config.max_iterations
            && iterations >= max_iterations
        {
            info!(max_iterations, "iteration limit reached");
            return Ok(LoopOutcome {
                iterations,
                stop: LoopStop::MaxIterations { max_iterations },
                settings,
            });
        }

        builder.build()?;

        let command = TargetCommand::assemble(&config.target_command, &settings)
            .ok_or_else(|| anyhow!("target command must not be empty"))?;
        iterations += 1;
        debug!(iteration = iterations, command = %command, "running target");

        let output = match runner.run(&command)? {
            RunOutcome::Completed(output) => output,
            RunOutcome::LaunchFailed => {
                info!(iteration = iterations, "target not launched, stopping");
                return Ok(LoopOutcome {
                    iterations,
                    stop: LoopStop::LaunchFailed,
                    settings,
                });
            }
        };

        let discovered = discover(&output.text);
        debug!(?discovered, "settings discovered");
        if settings.merge(discovered) == Merge::Exhausted {
            info!(iteration = iterations, "no camera or ticks reported, stopping");
            return Ok(LoopOutcome {
                iterations,
                stop: LoopStop::NothingDiscovered,
                settings,
            });
        }

        on_iteration(&IterationReport {
            iteration: iterations,
            command: &command,
            settings: &settings,
        });
    }
}
