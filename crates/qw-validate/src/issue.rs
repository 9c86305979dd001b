use std::fmt;

use qw_core::{Graph, NodeIndex, RecordId};
use serde::{Deserialize, Serialize};

/// The category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// A node with no edges at all.
    Orphan,
    /// A node no story entry point leads to.
    Unreachable,
    /// A quest whose declared prerequisites are not wired into the graph.
    BrokenChain,
    /// A condition outside the condition grammar.
    InvalidCondition,
    /// A dependency loop.
    CircularDependency,
    /// A prerequisite naming a quest that does not exist.
    MissingPrerequisites,
    /// A quest that breaks the quest-structure rules.
    InvalidStructure,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Orphan => "orphan",
            Self::Unreachable => "unreachable",
            Self::BrokenChain => "broken_chain",
            Self::InvalidCondition => "invalid_condition",
            Self::CircularDependency => "circular_dependency",
            Self::MissingPrerequisites => "missing_prerequisites",
            Self::InvalidStructure => "invalid_structure",
        };
        write!(f, "{s}")
    }
}

/// Whether an issue blocks validity or is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Makes the graph invalid.
    Error,
    /// Counts against export readiness only.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in the narrative content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// The issue category.
    #[serde(rename = "type")]
    pub kind: IssueType,
    /// The record the issue is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<RecordId>,
    /// The edge the issue is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
    /// Actionable hints for the author.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationIssue {
    /// Create an error-level issue.
    pub fn error(kind: IssueType, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    /// Create a warning-level issue.
    pub fn warning(kind: IssueType, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    fn new(kind: IssueType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            node_id: None,
            edge_id: None,
            message: message.into(),
            severity,
            suggestions: Vec::new(),
        }
    }

    /// Attach the issue to a record.
    pub fn at(mut self, id: &RecordId) -> Self {
        self.node_id = Some(id.clone());
        self
    }

    /// Attach the issue to a graph node.
    pub fn at_node(self, graph: &Graph, idx: NodeIndex) -> Self {
        self.at(&graph.node(idx).id)
    }

    /// Attach the issue to an edge.
    pub fn on_edge(mut self, edge_id: impl Into<String>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }

    /// Add a suggestion.
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Whether this issue is error-level.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "{}: [{}] {id}: {}", self.severity, self.kind, self.message),
            None => write!(f, "{}: [{}] {}", self.severity, self.kind, self.message),
        }
    }
}
