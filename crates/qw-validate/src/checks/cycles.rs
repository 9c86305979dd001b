use std::collections::{BTreeSet, btree_set};

use qw_core::{Graph, NodeIndex};

use crate::issue::{IssueType, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Every edge that closes a loop, as `(from, to)` where `to` is still on the
/// depth-first stack.
///
/// The walk uses an explicit stack so deep chains cannot overflow, and all
/// traversal state lives in this call.
pub fn find_back_edges(graph: &Graph) -> Vec<(NodeIndex, NodeIndex)> {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    let mut back_edges = Vec::new();

    for (start, _) in graph.nodes() {
        if marks[start.0] != Mark::Unvisited {
            continue;
        }
        let mut stack: Vec<(NodeIndex, btree_set::Iter<'_, NodeIndex>)> = Vec::new();
        marks[start.0] = Mark::OnStack;
        stack.push((start, graph.node(start).outgoing.iter()));

        while let Some((node, children)) = stack.last_mut() {
            let node = *node;
            let next = children.next().copied();
            match next {
                Some(child) => match marks[child.0] {
                    Mark::Unvisited => {
                        marks[child.0] = Mark::OnStack;
                        stack.push((child, graph.node(child).outgoing.iter()));
                    }
                    Mark::OnStack => back_edges.push((node, child)),
                    Mark::Done => {}
                },
                None => {
                    marks[node.0] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    back_edges
}

/// One error per node that a dependency loop re-enters.
pub fn check_cycles(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    let mut reported = BTreeSet::new();

    for (from, to) in find_back_edges(graph) {
        if !reported.insert(to) {
            continue;
        }
        let source = graph.node(from);
        let target = graph.node(to);
        let mut issue = ValidationIssue::error(
            IssueType::CircularDependency,
            format!(
                "{} \"{}\" is part of a dependency loop (looped back from {})",
                target.kind, target.label, source.id
            ),
        )
        .at_node(graph, to)
        .suggest("remove one of the outcome or prerequisite links in the loop");
        if let Some(edge) = graph.edges_from(from).find(|e| e.target == to) {
            issue = issue.on_edge(edge.id.clone());
        }
        issues.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qw_core::{EdgeKind, NodePayload, OutcomeKind, OutcomeRecord, QuestRecord, build_graph};

    fn leads_to(id: &str, title: &str, next: &str) -> QuestRecord {
        QuestRecord::new(id, title)
            .with_outcome(OutcomeRecord::new(OutcomeKind::Success, "done", 100.0).leading_to(next))
    }

    #[test]
    fn three_quest_loop_is_reported() {
        let graph = build_graph(
            &[],
            &[
                leads_to("q1", "One", "q2"),
                leads_to("q2", "Two", "q3"),
                leads_to("q3", "Three", "q1"),
            ],
            &[],
        );
        let mut issues = Vec::new();
        check_cycles(&graph, &mut issues);
        assert_eq!(issues.len(), 1);
        let node = issues[0].node_id.as_ref().map(|id| id.as_str().to_string());
        assert!(matches!(node.as_deref(), Some("q1" | "q2" | "q3")));
        assert_eq!(issues[0].edge_id.as_deref(), Some("outcome:q3->q1#2"));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = build_graph(&[], &[leads_to("q1", "Retry", "q1")], &[]);
        assert_eq!(find_back_edges(&graph).len(), 1);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut graph = Graph::new();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| graph.add_node(NodePayload::Quest(QuestRecord::new(*id, *id))))
            .collect();
        graph.add_edge(ids[0], ids[1], EdgeKind::Outcome, None);
        graph.add_edge(ids[0], ids[2], EdgeKind::Outcome, None);
        graph.add_edge(ids[1], ids[3], EdgeKind::Outcome, None);
        graph.add_edge(ids[2], ids[3], EdgeKind::Outcome, None);
        assert!(find_back_edges(&graph).is_empty());
    }

    fn dag(size: usize, pairs: &[(usize, usize)]) -> Graph {
        let mut graph = Graph::new();
        let nodes: Vec<_> = (0..size)
            .map(|i| graph.add_node(NodePayload::Quest(QuestRecord::new(format!("q{i}"), "q"))))
            .collect();
        for &(a, b) in pairs {
            let (lo, hi) = (a.min(b) % size, a.max(b) % size);
            if lo < hi {
                graph.add_edge(nodes[lo], nodes[hi], EdgeKind::Outcome, None);
            }
        }
        graph
    }

    proptest! {
        #[test]
        fn dags_have_no_cycles(
            size in 2usize..24,
            pairs in prop::collection::vec((0usize..24, 0usize..24), 0..60),
        ) {
            let graph = dag(size, &pairs);
            let mut issues = Vec::new();
            check_cycles(&graph, &mut issues);
            prop_assert!(issues.is_empty());
        }

        #[test]
        fn one_back_edge_makes_a_cycle(
            size in 2usize..24,
            pairs in prop::collection::vec((0usize..24, 0usize..24), 0..60),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut graph = dag(size, &pairs);
            let forward: Vec<_> = graph.edges().map(|e| (e.source, e.target)).collect();
            let (source, target) = if forward.is_empty() {
                graph.add_edge(NodeIndex(0), NodeIndex(1), EdgeKind::Outcome, None);
                (NodeIndex(0), NodeIndex(1))
            } else {
                forward[pick.index(forward.len())]
            };
            graph.add_edge(target, source, EdgeKind::Prerequisite, None);

            let mut issues = Vec::new();
            check_cycles(&graph, &mut issues);
            prop_assert!(!issues.is_empty());
        }
    }
}
