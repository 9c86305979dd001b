use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quest selection heuristic for the simulated player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    /// Prefers combat quests.
    Aggressive,
    /// Prefers dialogue quests.
    Diplomatic,
    /// Prefers exploration quests.
    Exploration,
    /// Picks uniformly at random.
    #[default]
    Balanced,
}

impl PlayStyle {
    /// Parse a style name. Unrecognized names fall back to [`PlayStyle::Balanced`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "aggressive" => Self::Aggressive,
            "diplomatic" => Self::Diplomatic,
            "exploration" | "explorer" => Self::Exploration,
            _ => Self::Balanced,
        }
    }

    /// The canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Diplomatic => "diplomatic",
            Self::Exploration => "exploration",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Simulated play time budget in minutes.
    pub max_duration_minutes: u32,
    /// Quest selection heuristic.
    pub play_style: PlayStyle,
    /// RNG seed. A random seed is drawn and recorded when unset.
    pub seed: Option<u64>,
    /// Real time after which the run is cut short.
    pub wall_clock_limit: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_duration_minutes: 60,
            play_style: PlayStyle::Balanced,
            seed: None,
            wall_clock_limit: Duration::from_secs(5),
        }
    }
}

impl SimConfig {
    /// Set the simulated time budget in minutes.
    pub fn with_max_duration(mut self, minutes: u32) -> Self {
        self.max_duration_minutes = minutes;
        self
    }

    /// Set the play style.
    pub fn with_play_style(mut self, style: PlayStyle) -> Self {
        self.play_style = style;
        self
    }

    /// Set the RNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the real-time deadline.
    pub fn with_wall_clock_limit(mut self, limit: Duration) -> Self {
        self.wall_clock_limit = limit;
        self
    }
}
