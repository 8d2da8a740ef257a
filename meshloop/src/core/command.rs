//! Target command assembly.

use std::fmt;

use crate::core::settings::{MeshSelector, Settings};

/// Argument vector for one target invocation.
///
/// Built fresh from the settings every iteration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TargetCommand {
    /// Assemble `<base> (-m <mesh> | -d) <pass-through> [camera] [seed] [ticks]`.
    ///
    /// `base` is the configured target command: the program followed by any
    /// fixed leading arguments. Returns `None` when `base` is empty.
    pub fn assemble(base: &[String], settings: &Settings) -> Option<Self> {
        let (program, prefix) = base.split_first()?;
        let mut args = prefix.to_vec();
        match &settings.mesh {
            MeshSelector::Mesh(path) => {
                args.push("-m".to_string());
                args.push(path.clone());
            }
            MeshSelector::Discover => args.push("-d".to_string()),
        }
        args.extend(settings.pass_through.iter().cloned());
        args.extend(
            [&settings.camera, &settings.seed, &settings.ticks]
                .into_iter()
                .flatten()
                .cloned(),
        );
        Some(Self {
            program: program.clone(),
            args,
        })
    }
}

impl fmt::Display for TargetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
