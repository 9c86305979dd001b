use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use qw_core::{Difficulty, RecordId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PlayStyle;
use crate::event::SimEvent;
use crate::player::{Alignment, PlayerState};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The simulated time budget ran out.
    TimeBudget,
    /// No quest could be started any more.
    NoAvailableQuests,
    /// The real-time deadline fired.
    Deadline,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TimeBudget => "time budget used up",
            Self::NoAvailableQuests => "no quests left to play",
            Self::Deadline => "real-time deadline reached",
        };
        f.write_str(s)
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Result id.
    pub id: Uuid,
    /// The project the content came from.
    pub project_id: Option<String>,
    /// The story arc that was played.
    pub story_arc_id: Option<RecordId>,
    /// Name of the simulated player.
    pub player_name: String,
    /// Selection heuristic used.
    pub play_style: PlayStyle,
    /// Requested difficulty.
    pub difficulty: Difficulty,
    /// The seed the run used.
    pub seed: u64,
    /// Player state before the first quest.
    pub initial_state: PlayerState,
    /// Player state after the last quest.
    pub final_state: PlayerState,
    /// Everything that happened, in order.
    pub events: Vec<SimEvent>,
    /// Quests started.
    pub quests_attempted: usize,
    /// Quests completed.
    pub quests_completed: usize,
    /// Quests failed.
    pub quests_failed: usize,
    /// Simulated seconds played.
    pub duration_seconds: u64,
    /// Final minus initial experience.
    pub experience_gained: i64,
    /// Final minus initial standing, per faction that moved.
    pub reputation_changes: BTreeMap<String, i64>,
    /// Final minus initial alignment.
    pub alignment_changes: Alignment,
    /// Why the run stopped.
    pub termination: Termination,
    /// When the run finished.
    pub created_at: DateTime<Utc>,
}

impl SimulationResult {
    /// Completed quests over attempted quests, 0 when nothing was attempted.
    pub fn success_rate(&self) -> f64 {
        if self.quests_attempted == 0 {
            0.0
        } else {
            self.quests_completed as f64 / self.quests_attempted as f64
        }
    }

    /// The condensed view returned for batch runs.
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            id: self.id,
            player_name: self.player_name.clone(),
            play_style: self.play_style,
            seed: self.seed,
            quests_completed: self.quests_completed,
            quests_failed: self.quests_failed,
            duration_seconds: self.duration_seconds,
            experience_gained: self.experience_gained,
            event_count: self.events.len(),
            termination: self.termination,
        }
    }
}

/// Per-faction difference between two states, omitting factions that did
/// not move.
pub fn reputation_diff(initial: &PlayerState, final_state: &PlayerState) -> BTreeMap<String, i64> {
    let mut diff = BTreeMap::new();
    for faction in initial.reputation.keys().chain(final_state.reputation.keys()) {
        let before = initial.reputation.get(faction).copied().unwrap_or(0);
        let after = final_state.reputation.get(faction).copied().unwrap_or(0);
        if before != after {
            diff.insert(faction.clone(), after - before);
        }
    }
    diff
}

/// A condensed simulation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Result id.
    pub id: Uuid,
    /// Name of the simulated player.
    pub player_name: String,
    /// Selection heuristic used.
    pub play_style: PlayStyle,
    /// The seed the run used.
    pub seed: u64,
    /// Quests completed.
    pub quests_completed: usize,
    /// Quests failed.
    pub quests_failed: usize,
    /// Simulated seconds played.
    pub duration_seconds: u64,
    /// Experience gained.
    pub experience_gained: i64,
    /// Number of events logged.
    pub event_count: usize,
    /// Why the run stopped.
    pub termination: Termination,
}
