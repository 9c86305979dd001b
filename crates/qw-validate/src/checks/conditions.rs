use qw_core::{
    Condition, ConditionRecord, DialogueRecord, Graph, NodePayload, QuestRecord, RecordId,
};

use crate::issue::{IssueType, ValidationIssue};

fn check_one(
    owner: &RecordId,
    place: &str,
    record: &ConditionRecord,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Err(e) = Condition::parse(record) {
        issues.push(
            ValidationIssue::error(IssueType::InvalidCondition, format!("{place}: {e}"))
                .at(owner)
                .suggest(
                    "use a type of stat, inventory, flag, quest or reputation \
                     with a matching operator",
                ),
        );
    }
}

/// Check prerequisite and outcome conditions of one quest.
pub fn check_quest_conditions(quest: &QuestRecord, issues: &mut Vec<ValidationIssue>) {
    for (i, record) in quest.prerequisites.iter().enumerate() {
        check_one(&quest.id, &format!("prerequisite {}", i + 1), record, issues);
    }
    for (i, outcome) in quest.outcomes.iter().enumerate() {
        for (j, record) in outcome.conditions.iter().enumerate() {
            let place = format!("outcome {} condition {}", i + 1, j + 1);
            check_one(&quest.id, &place, record, issues);
        }
    }
}

/// Check the gating conditions of one dialogue.
pub fn check_dialogue_conditions(dialogue: &DialogueRecord, issues: &mut Vec<ValidationIssue>) {
    for (i, record) in dialogue.conditions.iter().enumerate() {
        check_one(&dialogue.id, &format!("condition {}", i + 1), record, issues);
    }
}

/// Condition pass over every quest and dialogue in the graph.
pub fn check_conditions(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for (_, node) in graph.nodes() {
        match &node.payload {
            NodePayload::Quest(quest) => check_quest_conditions(quest, issues),
            NodePayload::Dialogue(dialogue) => check_dialogue_conditions(dialogue, issues),
            NodePayload::StoryArc(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qw_core::{ConditionValue, OutcomeKind, OutcomeRecord, build_graph};

    #[test]
    fn well_formed_conditions_pass() {
        let mut quest = QuestRecord::new("q1", "One").requires("q0");
        quest
            .prerequisites
            .push(ConditionRecord::new("reputation", "gte", "guild", ConditionValue::Number(10.0)));
        let mut issues = Vec::new();
        check_quest_conditions(&quest, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn membership_on_stat_is_invalid() {
        let mut quest = QuestRecord::new("q1", "One");
        quest
            .prerequisites
            .push(ConditionRecord::new("stat", "has", "level", ConditionValue::Number(3.0)));
        let mut issues = Vec::new();
        check_quest_conditions(&quest, &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueType::InvalidCondition);
        assert!(issues[0].message.starts_with("prerequisite 1:"));
    }

    #[test]
    fn outcome_and_dialogue_conditions_are_checked() {
        let mut outcome = OutcomeRecord::new(OutcomeKind::Branch, "sided with the rebels", 100.0);
        outcome.conditions.push(ConditionRecord::default());
        let quest = QuestRecord::new("q1", "One").with_outcome(outcome);

        let mut dialogue = DialogueRecord::new("d1", "q1", "Hello");
        dialogue
            .conditions
            .push(ConditionRecord::new("mood", "eq", "happy", ConditionValue::Bool(true)));

        let graph = build_graph(&[], &[quest], &[dialogue]);
        let mut issues = Vec::new();
        check_conditions(&graph, &mut issues);
        let owners: Vec<_> = issues
            .iter()
            .filter_map(|i| i.node_id.as_ref().map(|id| id.as_str()))
            .collect();
        assert_eq!(owners, vec!["q1", "d1"]);
        assert_eq!(issues[0].message, "outcome 1 condition 1: condition is missing a type");
    }
}
