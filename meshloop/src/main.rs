//! Rebuild-and-relaunch loop for the interactive mesh previewer.
//!
//! Each iteration runs the build, launches the target, and carries the
//! `--camera=`, `--seed=` and `--ticks=` settings it prints into the next
//! launch. The loop ends when the target reports nothing or cannot start.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::{debug, info};

use meshloop::core::settings::Settings;
use meshloop::exit_codes;
use meshloop::io::builder::CommandBuilder;
use meshloop::io::config::{DEFAULT_CONFIG_FILE, MeshloopConfig, load_config};
use meshloop::io::target::ProcessTargetRunner;
use meshloop::logging;
use meshloop::looping::{LoopConfig, run_loop};

#[derive(Parser, Debug)]
#[command(
    name = "meshloop",
    version,
    about = "Rebuild and relaunch the previewer, feeding back the settings it reports"
)]
struct Cli {
    /// Mesh to preview. Without one the target runs in discovery mode (`-d`).
    meshes: Vec<String>,

    /// Initial random seed passed as `--seed=<SEED>`.
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Value forwarded to the target as `-r <VALUE>`. Repeatable.
    #[arg(
        short = 'r',
        value_name = "VALUE",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    resolution: Vec<String>,

    /// Config file. Defaults to `meshloop.toml` in the working directory if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many target runs.
    #[arg(long)]
    max_iterations: Option<u32>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FATAL);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.meshes.len() > 1 {
        bail!("only one mesh can be previewed");
    }

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = Some(max_iterations);
        config.validate()?;
    }
    debug!(?config, "config loaded");

    let settings = Settings::new(
        cli.meshes.into_iter().next(),
        cli.seed,
        pass_through(&cli.resolution),
    );
    let builder = CommandBuilder::new(config.build.command.clone());
    let loop_config = LoopConfig {
        target_command: config.target.command.clone(),
        max_iterations: config.max_iterations,
    };

    let outcome = run_loop(
        &builder,
        &ProcessTargetRunner,
        &loop_config,
        settings,
        |report| {
            info!(
                iteration = report.iteration,
                command = %report.command,
                camera = ?report.settings.camera,
                seed = ?report.settings.seed,
                ticks = ?report.settings.ticks,
                "settings updated"
            );
        },
    )?;

    info!(
        iterations = outcome.iterations,
        stop = ?outcome.stop,
        camera = ?outcome.settings.camera,
        seed = ?outcome.settings.seed,
        ticks = ?outcome.settings.ticks,
        "preview loop finished"
    );
    Ok(())
}

/// Each `-r` value is forwarded as the pair `-r <VALUE>`, in command-line order.
fn pass_through(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| ["-r".to_string(), value.clone()])
        .collect()
}

/// An explicit `--config` must exist; the default file is optional.
fn resolve_config(path: Option<&Path>) -> Result<MeshloopConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            load_config(path).context("load config")
        }
        None => load_config(Path::new(DEFAULT_CONFIG_FILE)).context("load config"),
    }
}
