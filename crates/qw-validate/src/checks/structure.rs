use qw_core::QuestRecord;

use crate::config::ValidationConfig;
use crate::issue::{IssueType, ValidationIssue};

/// Quest-local structure rules: text present, at least one outcome, outcome
/// descriptions present, probabilities in range and summing to 100.
pub fn check_quest_structure(
    quest: &QuestRecord,
    config: &ValidationConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    let invalid = |message: String| {
        ValidationIssue::error(IssueType::InvalidStructure, message).at(&quest.id)
    };

    if quest.title.trim().is_empty() {
        issues.push(invalid("quest title is empty".into()).suggest("give the quest a title"));
    }
    if quest.description.trim().is_empty() {
        issues.push(
            invalid("quest description is empty".into())
                .suggest("describe what the player has to do"),
        );
    }
    if quest.outcomes.is_empty() {
        issues.push(
            invalid("quest has no outcomes".into())
                .suggest("add at least a success and a failure outcome"),
        );
        return;
    }

    for (i, outcome) in quest.outcomes.iter().enumerate() {
        let n = i + 1;
        if outcome.description.trim().is_empty() {
            issues.push(invalid(format!("outcome {n} has no description")));
        }
        if !(0.0..=100.0).contains(&outcome.probability) {
            issues.push(
                invalid(format!(
                    "outcome {n} probability {} is outside 0..=100",
                    outcome.probability
                ))
                .suggest("use a percentage between 0 and 100"),
            );
        }
    }

    let total: f64 = quest.outcomes.iter().map(|o| o.probability).sum();
    if (total - 100.0).abs() > config.probability_tolerance {
        issues.push(
            ValidationIssue::warning(
                IssueType::InvalidStructure,
                format!("outcome probabilities sum to {total}, expected 100"),
            )
            .at(&quest.id)
            .suggest("adjust the outcome probabilities so they add up to 100"),
        );
    }
}
