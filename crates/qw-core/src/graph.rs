use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::ConditionRecord;
use crate::record::{DialogueRecord, OutcomeRecord, QuestRecord, RecordId, StoryArcRecord};

/// Handle of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

/// Handle of an edge in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

/// The kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A story arc; arcs without incoming edges are entry points.
    StoryArc,
    /// A quest.
    Quest,
    /// A dialogue.
    Dialogue,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StoryArc => "story arc",
            Self::Quest => "quest",
            Self::Dialogue => "dialogue",
        };
        write!(f, "{s}")
    }
}

/// The record a node was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// Story arc record.
    StoryArc(StoryArcRecord),
    /// Quest record.
    Quest(QuestRecord),
    /// Dialogue record.
    Dialogue(DialogueRecord),
}

impl NodePayload {
    /// The node kind matching this payload.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::StoryArc(_) => NodeKind::StoryArc,
            Self::Quest(_) => NodeKind::Quest,
            Self::Dialogue(_) => NodeKind::Dialogue,
        }
    }

    /// Identifier of the underlying record.
    pub fn id(&self) -> &RecordId {
        match self {
            Self::StoryArc(a) => &a.id,
            Self::Quest(q) => &q.id,
            Self::Dialogue(d) => &d.id,
        }
    }

    /// Display label of the underlying record.
    pub fn label(&self) -> &str {
        match self {
            Self::StoryArc(a) => &a.title,
            Self::Quest(q) => &q.title,
            Self::Dialogue(d) => &d.title,
        }
    }
}

/// A node of the narrative graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Record identifier.
    pub id: RecordId,
    /// Node kind.
    pub kind: NodeKind,
    /// Display label.
    pub label: String,
    /// The record this node was built from.
    pub payload: NodePayload,
    /// Nodes with an edge into this node.
    pub incoming: BTreeSet<NodeIndex>,
    /// Nodes this node has an edge to.
    pub outgoing: BTreeSet<NodeIndex>,
}

impl Node {
    /// A node with no edges in either direction.
    pub fn is_orphan(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }

    /// The quest record, if this is a quest node.
    pub fn as_quest(&self) -> Option<&QuestRecord> {
        match &self.payload {
            NodePayload::Quest(q) => Some(q),
            _ => None,
        }
    }
}

/// The kind of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Containment: story arc to quest, quest to dialogue.
    BelongsTo,
    /// Prerequisite quest to the quest that requires it.
    Prerequisite,
    /// Quest to the quest one of its outcomes leads to.
    Outcome,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BelongsTo => "belongs_to",
            Self::Prerequisite => "prerequisite",
            Self::Outcome => "outcome",
        };
        write!(f, "{s}")
    }
}

/// Data carried by prerequisite and outcome edges.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgePayload {
    /// The prerequisite condition that produced the edge.
    Condition(ConditionRecord),
    /// The outcome that produced the edge.
    Outcome(OutcomeRecord),
}

/// A directed edge of the narrative graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Deterministic edge identifier.
    pub id: String,
    /// Source node.
    pub source: NodeIndex,
    /// Target node.
    pub target: NodeIndex,
    /// Edge kind.
    pub kind: EdgeKind,
    /// Record data behind the edge.
    pub payload: Option<EdgePayload>,
}

/// The narrative graph of one project.
///
/// Nodes and edges live in arenas and refer to each other by index. The graph
/// is built fresh for every validation or simulation request.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    // Indexes
    by_id: HashMap<RecordId, NodeIndex>,
    edges_from: Vec<Vec<EdgeIndex>>,
    edges_to: Vec<Vec<EdgeIndex>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a node for a record. If a node with the same id already exists the
    /// id index keeps pointing at the first one.
    pub fn add_node(&mut self, payload: NodePayload) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        let id = payload.id().clone();
        if self.by_id.contains_key(&id) {
            tracing::debug!(%id, "duplicate record id in graph");
        } else {
            self.by_id.insert(id.clone(), idx);
        }
        self.nodes.push(Node {
            id,
            kind: payload.kind(),
            label: payload.label().to_string(),
            payload,
            incoming: BTreeSet::new(),
            outgoing: BTreeSet::new(),
        });
        self.edges_from.push(Vec::new());
        self.edges_to.push(Vec::new());
        idx
    }

    /// Add a directed edge, updating adjacency on both endpoints.
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        kind: EdgeKind,
        payload: Option<EdgePayload>,
    ) -> EdgeIndex {
        let idx = EdgeIndex(self.edges.len());
        let id = format!(
            "{kind}:{}->{}#{}",
            self.nodes[source.0].id, self.nodes[target.0].id, idx.0
        );
        self.nodes[source.0].outgoing.insert(target);
        self.nodes[target.0].incoming.insert(source);
        self.edges_from[source.0].push(idx);
        self.edges_to[target.0].push(idx);
        self.edges.push(Edge {
            id,
            source,
            target,
            kind,
            payload,
        });
        idx
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a node by index.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Get an edge by index.
    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.edges[idx.0]
    }

    /// Find a node by record id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Whether a record id is part of the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All nodes with their indices, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges leaving a node.
    pub fn edges_from(&self, idx: NodeIndex) -> impl Iterator<Item = &Edge> {
        self.edges_from[idx.0].iter().map(|e| &self.edges[e.0])
    }

    /// Edges entering a node.
    pub fn edges_to(&self, idx: NodeIndex) -> impl Iterator<Item = &Edge> {
        self.edges_to[idx.0].iter().map(|e| &self.edges[e.0])
    }

    /// Quest nodes with their records.
    pub fn quests(&self) -> impl Iterator<Item = (NodeIndex, &QuestRecord)> {
        self.nodes()
            .filter_map(|(idx, node)| node.as_quest().map(|q| (idx, q)))
    }

    /// Story arcs without incoming edges: the entry points of the story.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, n)| n.kind == NodeKind::StoryArc && n.incoming.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes of the given kind.
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest(id: &str) -> NodePayload {
        NodePayload::Quest(QuestRecord::new(id, id.to_uppercase()))
    }

    #[test]
    fn add_edge_updates_both_endpoints() {
        let mut graph = Graph::new();
        let a = graph.add_node(quest("a"));
        let b = graph.add_node(quest("b"));
        graph.add_edge(a, b, EdgeKind::Outcome, None);

        assert!(graph.node(a).outgoing.contains(&b));
        assert!(graph.node(b).incoming.contains(&a));
        assert_eq!(graph.edges_from(a).count(), 1);
        assert_eq!(graph.edges_to(b).count(), 1);
        assert_eq!(graph.edges_to(a).count(), 0);
    }

    #[test]
    fn parallel_edges_share_adjacency_entry() {
        let mut graph = Graph::new();
        let a = graph.add_node(quest("a"));
        let b = graph.add_node(quest("b"));
        graph.add_edge(a, b, EdgeKind::Outcome, None);
        graph.add_edge(a, b, EdgeKind::Prerequisite, None);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node(a).outgoing.len(), 1);
        assert_ne!(graph.edge(EdgeIndex(0)).id, graph.edge(EdgeIndex(1)).id);
    }

    #[test]
    fn find_by_record_id() {
        let mut graph = Graph::new();
        let a = graph.add_node(quest("a"));
        assert_eq!(graph.find("a"), Some(a));
        assert!(graph.find("zzz").is_none());
        assert_eq!(graph.node(a).label, "A");
    }

    #[test]
    fn roots_are_arcs_without_incoming() {
        let mut graph = Graph::new();
        let arc = graph.add_node(NodePayload::StoryArc(StoryArcRecord::new("arc", "Arc")));
        let q = graph.add_node(quest("q"));
        graph.add_edge(arc, q, EdgeKind::BelongsTo, None);
        assert_eq!(graph.roots(), vec![arc]);
        assert!(!graph.node(q).is_orphan());
    }
}
