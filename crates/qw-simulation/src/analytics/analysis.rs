use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AlignmentBucket, dominant};
use crate::event::{EventSeverity, SimEvent, SimEventKind};
use crate::player::Alignment;
use crate::result::SimulationResult;

/// Width of a timeline bucket in simulated seconds.
pub const TIME_BUCKET_SECONDS: u64 = 300;

/// Most critical events listed in an analysis.
pub const MAX_CRITICAL_EVENTS: usize = 10;

/// Headline figures of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    /// Quests started.
    pub quests_attempted: usize,
    /// Quests completed.
    pub quests_completed: usize,
    /// Quests failed.
    pub quests_failed: usize,
    /// Completed over attempted.
    pub success_rate: f64,
    /// Simulated seconds.
    pub duration_seconds: u64,
    /// Experience gained.
    pub experience_gained: i64,
    /// Events logged.
    pub total_events: usize,
}

/// Reputation movement of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationAnalysis {
    /// Change per faction.
    pub changes: BTreeMap<String, i64>,
    /// Final standing per faction.
    pub final_standing: BTreeMap<String, i64>,
    /// Faction with the largest gain.
    pub most_improved: Option<String>,
    /// Faction with the largest loss.
    pub most_damaged: Option<String>,
}

/// Alignment movement of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentAnalysis {
    /// Alignment at the start.
    pub initial: Alignment,
    /// Alignment at the end.
    pub final_alignment: Alignment,
    /// Final minus initial.
    pub changes: Alignment,
    /// Leading component at the end.
    pub dominant: AlignmentBucket,
}

/// When and what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTimeline {
    /// Events per kind.
    pub histogram: BTreeMap<SimEventKind, usize>,
    /// Events per bucket, keyed by the bucket's start second.
    pub time_buckets: BTreeMap<u64, usize>,
    /// Completions, failures, and successes, first ones first.
    pub critical_events: Vec<SimEvent>,
}

/// Single-result analysis view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The analyzed result.
    pub simulation_id: Uuid,
    /// Headline figures.
    pub basic_stats: BasicStats,
    /// Reputation movement.
    pub reputation_analysis: ReputationAnalysis,
    /// Alignment movement.
    pub alignment_analysis: AlignmentAnalysis,
    /// Event breakdown.
    pub event_timeline: EventTimeline,
}

fn is_critical(event: &SimEvent) -> bool {
    matches!(event.severity, EventSeverity::Error | EventSeverity::Success)
        || event.kind == SimEventKind::QuestComplete
}

/// Analyze one result.
pub fn analyze(result: &SimulationResult) -> Analysis {
    let changes = &result.reputation_changes;
    let most_improved = changes
        .iter()
        .filter(|(_, d)| **d > 0)
        .max_by_key(|(_, d)| **d)
        .map(|(f, _)| f.clone());
    let most_damaged = changes
        .iter()
        .filter(|(_, d)| **d < 0)
        .min_by_key(|(_, d)| **d)
        .map(|(f, _)| f.clone());

    let mut histogram = BTreeMap::new();
    let mut time_buckets = BTreeMap::new();
    for event in &result.events {
        *histogram.entry(event.kind).or_insert(0) += 1;
        let bucket = event.timestamp_seconds / TIME_BUCKET_SECONDS * TIME_BUCKET_SECONDS;
        *time_buckets.entry(bucket).or_insert(0) += 1;
    }

    let critical_events = result
        .events
        .iter()
        .filter(|e| is_critical(e))
        .take(MAX_CRITICAL_EVENTS)
        .cloned()
        .collect();

    let final_alignment = result.final_state.alignment;
    Analysis {
        simulation_id: result.id,
        basic_stats: BasicStats {
            quests_attempted: result.quests_attempted,
            quests_completed: result.quests_completed,
            quests_failed: result.quests_failed,
            success_rate: result.success_rate(),
            duration_seconds: result.duration_seconds,
            experience_gained: result.experience_gained,
            total_events: result.events.len(),
        },
        reputation_analysis: ReputationAnalysis {
            changes: changes.clone(),
            final_standing: result.final_state.reputation.clone(),
            most_improved,
            most_damaged,
        },
        alignment_analysis: AlignmentAnalysis {
            initial: result.initial_state.alignment,
            final_alignment,
            changes: final_alignment.diff(&result.initial_state.alignment),
            dominant: dominant(&final_alignment),
        },
        event_timeline: EventTimeline {
            histogram,
            time_buckets,
            critical_events,
        },
    }
}
