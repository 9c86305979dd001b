//! Read-only aggregation over finished simulation results.

/// Single-result analysis.
pub mod analysis;
/// Multi-result comparison.
pub mod compare;

pub use analysis::{Analysis, analyze};
pub use compare::{Comparison, compare};

use serde::{Deserialize, Serialize};

use crate::player::Alignment;

/// The component that leads an alignment triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentBucket {
    /// Good leads.
    Good,
    /// Neutral leads, or ties for the lead.
    Neutral,
    /// Evil leads.
    Evil,
}

/// Classify an alignment by its largest component. Ties go to neutral,
/// then good.
pub fn dominant(alignment: &Alignment) -> AlignmentBucket {
    let top = alignment.good.max(alignment.neutral).max(alignment.evil);
    if alignment.neutral == top {
        AlignmentBucket::Neutral
    } else if alignment.good == top {
        AlignmentBucket::Good
    } else {
        AlignmentBucket::Evil
    }
}


#[cfg(test)]
pub(crate) mod tests_support {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use qw_core::Difficulty;
    use uuid::Uuid;

    use crate::config::PlayStyle;
    use crate::player::{Alignment, PlayerState};
    use crate::result::{SimulationResult, Termination};

    /// A hand-built result with the given headline figures.
    pub fn fake_result(
        style: PlayStyle,
        duration_seconds: u64,
        experience_gained: i64,
        quests_completed: usize,
        quests_attempted: usize,
    ) -> SimulationResult {
        SimulationResult {
            id: Uuid::new_v4(),
            project_id: None,
            story_arc_id: None,
            player_name: "tester".into(),
            play_style: style,
            difficulty: Difficulty::Medium,
            seed: 0,
            initial_state: PlayerState::default(),
            final_state: PlayerState::default(),
            events: Vec::new(),
            quests_attempted,
            quests_completed,
            quests_failed: quests_attempted - quests_completed,
            duration_seconds,
            experience_gained,
            reputation_changes: BTreeMap::new(),
            alignment_changes: Alignment::zero(),
            termination: Termination::NoAvailableQuests,
            created_at: Utc::now(),
        }
    }
}
