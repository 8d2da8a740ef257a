//! Settings threaded between preview iterations.

use crate::core::extract::Discovered;

/// How the target is told which scene to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshSelector {
    /// `-m <path>`: preview an explicit mesh.
    Mesh(String),
    /// `-d`: let the target pick and report its own scene.
    Discover,
}

/// Settings bundle owned by the loop controller.
///
/// Flag fields hold the complete token passed to the target (`--seed=42`),
/// exactly as it was discovered in the target's output or built from the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mesh: MeshSelector,
    /// Forwarded verbatim, never interpreted.
    pub pass_through: Vec<String>,
    pub camera: Option<String>,
    pub seed: Option<String>,
    pub ticks: Option<String>,
}

/// Result of folding one iteration's discoveries into the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Camera or ticks were found; the loop should run again.
    Continue,
    /// Neither camera nor ticks were found; the target has nothing more to report.
    Exhausted,
}

impl Settings {
    /// Initial settings for a run. An empty mesh path selects discovery mode.
    pub fn new(mesh: Option<String>, seed: Option<i64>, pass_through: Vec<String>) -> Self {
        let mesh = match mesh {
            Some(path) if !path.is_empty() => MeshSelector::Mesh(path),
            _ => MeshSelector::Discover,
        };
        Self {
            mesh,
            pass_through,
            camera: None,
            seed: seed.map(seed_flag),
            ticks: None,
        }
    }

    /// Fold discoveries from the latest run into the settings.
    ///
    /// Camera and ticks are replaced wholesale (an absent value clears the
    /// previous one). Seed only changes when a new one is reported.
    pub fn merge(&mut self, discovered: Discovered) -> Merge {
        if discovered.camera.is_none() && discovered.ticks.is_none() {
            return Merge::Exhausted;
        }
        self.camera = discovered.camera;
        self.ticks = discovered.ticks;
        if let Some(seed) = discovered.seed {
            self.seed = Some(seed);
        }
        Merge::Continue
    }
}

/// Format a numeric seed the way the target expects it.
pub fn seed_flag(seed: i64) -> String {
    format!("--seed={seed}")
}
