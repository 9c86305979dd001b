use qw_core::{EdgeKind, Graph, NodeIndex, NodeKind, QuestRecord};

use crate::issue::{IssueType, ValidationIssue};

/// A quest that declares quest prerequisites but has no incoming
/// prerequisite edge was never wired into the graph.
///
/// Only prerequisites that reference a quest are counted. Stat, flag,
/// reputation, and inventory prerequisites never produce an edge, so a quest
/// gated only by them is not a broken chain.
pub fn check_broken_chain(
    graph: &Graph,
    idx: NodeIndex,
    quest: &QuestRecord,
    issues: &mut Vec<ValidationIssue>,
) {
    let declared = quest.prerequisite_quests().count();
    if declared == 0 {
        return;
    }
    let wired = graph
        .edges_to(idx)
        .filter(|e| e.kind == EdgeKind::Prerequisite)
        .count();
    if wired > 0 {
        return;
    }
    issues.push(
        ValidationIssue::error(
            IssueType::BrokenChain,
            format!(
                "quest \"{}\" declares {declared} prerequisite(s) but none are linked in the graph",
                quest.title
            ),
        )
        .at(&quest.id)
        .suggest("check that the prerequisite quests exist in this project")
        .suggest("remove prerequisites that no longer apply"),
    );
}

/// Report every prerequisite id that does not name a quest in the graph.
pub fn check_missing_prerequisites(
    graph: &Graph,
    quest: &QuestRecord,
    issues: &mut Vec<ValidationIssue>,
) {
    for required in quest.prerequisite_quests() {
        let present = graph
            .find(required)
            .is_some_and(|idx| graph.node(idx).kind == NodeKind::Quest);
        if present {
            continue;
        }
        issues.push(
            ValidationIssue::error(
                IssueType::MissingPrerequisites,
                format!(
                    "quest \"{}\" requires quest {required}, which does not exist",
                    quest.title
                ),
            )
            .at(&quest.id)
            .suggest(format!("create quest {required} or drop the prerequisite")),
        );
    }
}

/// Broken-chain pass over every quest in the graph.
pub fn check_broken_chains(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for (idx, quest) in graph.quests() {
        check_broken_chain(graph, idx, quest, issues);
    }
}

/// Missing-prerequisite pass over every quest in the graph.
pub fn check_all_prerequisites(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for (_, quest) in graph.quests() {
        check_missing_prerequisites(graph, quest, issues);
    }
}
