use std::collections::VecDeque;

use qw_core::Graph;

use crate::issue::{IssueType, ValidationIssue};

/// Flags reached by a breadth-first walk from every story entry point.
pub fn reachable_from_roots(graph: &Graph) -> Vec<bool> {
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    for root in graph.roots() {
        visited[root.0] = true;
        queue.push_back(root);
    }

    while let Some(idx) = queue.pop_front() {
        for &next in &graph.node(idx).outgoing {
            if !visited[next.0] {
                visited[next.0] = true;
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Report connected nodes that no story entry point leads to. Orphans are
/// left to the orphan pass.
pub fn check_reachability(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    let visited = reachable_from_roots(graph);

    for (idx, node) in graph.nodes() {
        if visited[idx.0] || node.is_orphan() {
            continue;
        }
        issues.push(
            ValidationIssue::error(
                IssueType::Unreachable,
                format!(
                    "{} \"{}\" cannot be reached from any story arc",
                    node.kind, node.label
                ),
            )
            .at_node(graph, idx)
            .suggest("attach it to a story arc")
            .suggest("make it the outcome or prerequisite of a reachable quest"),
        );
    }
}
