use qw_core::Graph;

use crate::issue::{IssueType, ValidationIssue};

/// Warn about every node with no edges in either direction.
pub fn check_orphans(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for (idx, node) in graph.nodes() {
        if !node.is_orphan() {
            continue;
        }
        issues.push(
            ValidationIssue::warning(
                IssueType::Orphan,
                format!("{} \"{}\" is not connected to anything", node.kind, node.label),
            )
            .at_node(graph, idx)
            .suggest(format!("link this {} into the story", node.kind))
            .suggest("remove it if it is no longer needed"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qw_core::{NodePayload, QuestRecord, StoryArcRecord, build_graph};

    #[test]
    fn lone_story_arc_is_an_orphan() {
        let graph = build_graph(&[StoryArcRecord::new("arc", "The Long Road")], &[], &[]);
        let mut issues = Vec::new();
        check_orphans(&graph, &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(issues[0].node_id.as_ref().map(|id| id.as_str()), Some("arc"));
    }

    #[test]
    fn connected_nodes_are_not_orphans() {
        let graph = build_graph(
            &[StoryArcRecord::new("arc", "Arc")],
            &[QuestRecord::new("q1", "First").in_arc("arc")],
            &[],
        );
        let mut issues = Vec::new();
        check_orphans(&graph, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn one_warning_per_orphan() {
        let mut graph = Graph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(NodePayload::Quest(QuestRecord::new(id, id)));
        }
        let mut issues = Vec::new();
        check_orphans(&graph, &mut issues);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.kind == IssueType::Orphan));
    }
}
