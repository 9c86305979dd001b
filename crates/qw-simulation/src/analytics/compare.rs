use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AlignmentBucket, dominant};
use crate::config::PlayStyle;
use crate::result::SimulationResult;

/// Reputation movement of one faction across results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactionAggregate {
    /// Sum of the changes.
    pub sum: i64,
    /// Results in which the faction moved.
    pub count: usize,
    /// `sum / count`.
    pub average: f64,
}

/// How many results end in each alignment bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentDistribution {
    /// Good-dominant results.
    pub good: usize,
    /// Neutral-dominant results.
    pub neutral: usize,
    /// Evil-dominant results.
    pub evil: usize,
}

/// Averages for the results of one play style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleStats {
    /// Results with this style.
    pub count: usize,
    /// Mean experience gained.
    pub average_experience: f64,
    /// Mean quests completed.
    pub average_quests_completed: f64,
    /// Completed over attempted quests, pooled.
    pub success_rate: f64,
}

/// Aggregate view over several results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Results compared.
    pub total_simulations: usize,
    /// Mean simulated seconds.
    pub average_duration: f64,
    /// Mean experience gained.
    pub average_experience: f64,
    /// Mean quests completed.
    pub average_quests_completed: f64,
    /// Per-faction reputation movement.
    pub reputation_changes: BTreeMap<String, FactionAggregate>,
    /// Final alignment buckets.
    pub alignment_distribution: AlignmentDistribution,
    /// Per-style averages.
    pub play_style_analysis: BTreeMap<PlayStyle, StyleStats>,
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Compare a set of results. An empty set yields all-zero figures.
pub fn compare(results: &[SimulationResult]) -> Comparison {
    let n = results.len();
    let mut comparison = Comparison {
        total_simulations: n,
        average_duration: mean(results.iter().map(|r| r.duration_seconds as f64).sum(), n),
        average_experience: mean(results.iter().map(|r| r.experience_gained as f64).sum(), n),
        average_quests_completed: mean(
            results.iter().map(|r| r.quests_completed as f64).sum(),
            n,
        ),
        ..Comparison::default()
    };

    for result in results {
        for (faction, delta) in &result.reputation_changes {
            let entry = comparison
                .reputation_changes
                .entry(faction.clone())
                .or_default();
            entry.sum += delta;
            entry.count += 1;
        }

        let bucket = &mut comparison.alignment_distribution;
        match dominant(&result.final_state.alignment) {
            AlignmentBucket::Good => bucket.good += 1,
            AlignmentBucket::Neutral => bucket.neutral += 1,
            AlignmentBucket::Evil => bucket.evil += 1,
        }
    }
    for aggregate in comparison.reputation_changes.values_mut() {
        aggregate.average = mean(aggregate.sum as f64, aggregate.count);
    }

    let mut by_style: BTreeMap<PlayStyle, Vec<&SimulationResult>> = BTreeMap::new();
    for result in results {
        by_style.entry(result.play_style).or_default().push(result);
    }
    for (style, group) in by_style {
        let count = group.len();
        let attempted: usize = group.iter().map(|r| r.quests_attempted).sum();
        let completed: usize = group.iter().map(|r| r.quests_completed).sum();
        comparison.play_style_analysis.insert(
            style,
            StyleStats {
                count,
                average_experience: mean(
                    group.iter().map(|r| r.experience_gained as f64).sum(),
                    count,
                ),
                average_quests_completed: mean(completed as f64, count),
                success_rate: mean(completed as f64, attempted),
            },
        );
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::tests_support::fake_result;
    use crate::player::Alignment;

    #[test]
    fn empty_comparison_is_zero() {
        let comparison = compare(&[]);
        assert_eq!(comparison.total_simulations, 0);
        assert_eq!(comparison.average_duration, 0.0);
        assert!(comparison.play_style_analysis.is_empty());
    }

    #[test]
    fn averages_and_groups() {
        let mut a = fake_result(PlayStyle::Aggressive, 600, 100, 2, 3);
        a.reputation_changes.insert("guild".into(), 6);
        a.final_state.alignment = Alignment::new(10, 20, 70);
        let mut b = fake_result(PlayStyle::Aggressive, 1200, 200, 3, 3);
        b.reputation_changes.insert("guild".into(), -2);
        let c = fake_result(PlayStyle::Diplomatic, 300, 0, 0, 1);

        let comparison = compare(&[a, b, c]);
        assert_eq!(comparison.total_simulations, 3);
        assert!((comparison.average_duration - 700.0).abs() < 1e-9);
        assert!((comparison.average_experience - 100.0).abs() < 1e-9);

        let guild = &comparison.reputation_changes["guild"];
        assert_eq!(guild.sum, 4);
        assert_eq!(guild.count, 2);
        assert!((guild.average - 2.0).abs() < 1e-9);

        assert_eq!(comparison.alignment_distribution.evil, 1);
        assert_eq!(comparison.alignment_distribution.neutral, 2);

        let aggressive = &comparison.play_style_analysis[&PlayStyle::Aggressive];
        assert_eq!(aggressive.count, 2);
        assert!((aggressive.success_rate - 5.0 / 6.0).abs() < 1e-9);
        let diplomatic = &comparison.play_style_analysis[&PlayStyle::Diplomatic];
        assert_eq!(diplomatic.success_rate, 0.0);
    }
}
