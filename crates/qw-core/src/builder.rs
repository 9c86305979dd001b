//! Turns flat project records into the narrative [`Graph`].

use crate::graph::{EdgeKind, EdgePayload, Graph, NodeIndex, NodeKind, NodePayload};
use crate::record::{DialogueRecord, Project, QuestRecord, StoryArcRecord};

/// Build the graph for one project's records in O(V + E).
///
/// Edges run parent to child:
/// - story arc → quest (`BelongsTo`) when the quest names its arc,
/// - prerequisite quest → quest (`Prerequisite`) per quest reference,
/// - quest → next quest (`Outcome`) per outcome with a follow-up,
/// - quest → dialogue (`BelongsTo`) when the dialogue names its quest.
///
/// References to ids that are not in the records produce no edge and no
/// error; reporting them is the validator's job.
pub fn build_graph(
    story_arcs: &[StoryArcRecord],
    quests: &[QuestRecord],
    dialogues: &[DialogueRecord],
) -> Graph {
    let mut graph = Graph::new();

    for arc in story_arcs {
        graph.add_node(NodePayload::StoryArc(arc.clone()));
    }
    let quest_nodes: Vec<NodeIndex> = quests
        .iter()
        .map(|q| graph.add_node(NodePayload::Quest(q.clone())))
        .collect();
    let dialogue_nodes: Vec<NodeIndex> = dialogues
        .iter()
        .map(|d| graph.add_node(NodePayload::Dialogue(d.clone())))
        .collect();

    for (quest, &node) in quests.iter().zip(&quest_nodes) {
        if let Some(arc_id) = &quest.story_arc_id
            && let Some(arc) = find_kind(&graph, arc_id.as_str(), NodeKind::StoryArc)
        {
            graph.add_edge(arc, node, EdgeKind::BelongsTo, None);
        }

        for prereq in &quest.prerequisites {
            if let Some(required) = prereq.referenced_quest()
                && let Some(source) = find_kind(&graph, required, NodeKind::Quest)
            {
                graph.add_edge(
                    source,
                    node,
                    EdgeKind::Prerequisite,
                    Some(EdgePayload::Condition(prereq.clone())),
                );
            }
        }

        for outcome in &quest.outcomes {
            if let Some(next) = &outcome.next_quest_id
                && let Some(target) = find_kind(&graph, next.as_str(), NodeKind::Quest)
            {
                graph.add_edge(
                    node,
                    target,
                    EdgeKind::Outcome,
                    Some(EdgePayload::Outcome(outcome.clone())),
                );
            }
        }
    }

    for (dialogue, &node) in dialogues.iter().zip(&dialogue_nodes) {
        if let Some(quest_id) = &dialogue.quest_id
            && let Some(quest) = find_kind(&graph, quest_id.as_str(), NodeKind::Quest)
        {
            graph.add_edge(quest, node, EdgeKind::BelongsTo, None);
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built narrative graph"
    );
    graph
}

impl Graph {
    /// Build the graph for every story arc, quest, and dialogue of a project.
    pub fn from_project(project: &Project) -> Self {
        build_graph(&project.story_arcs, &project.quests, &project.dialogues)
    }
}

fn find_kind(graph: &Graph, id: &str, kind: NodeKind) -> Option<NodeIndex> {
    graph.find(id).filter(|idx| graph.node(*idx).kind == kind)
}
