use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use qw_core::{Graph, NodeKind};
use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::issue::{IssueType, ValidationIssue};

/// Counts shown alongside a validation report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Nodes inspected.
    pub total_nodes: usize,
    /// Edges inspected.
    pub total_edges: usize,
    /// Story arc nodes.
    pub story_arcs: usize,
    /// Quest nodes.
    pub quests: usize,
    /// Dialogue nodes.
    pub dialogues: usize,
    /// Error-level issues.
    pub error_count: usize,
    /// Warning-level issues.
    pub warning_count: usize,
    /// Issues per category.
    pub by_type: BTreeMap<IssueType, usize>,
}

impl ValidationSummary {
    /// Node and edge counts of a whole graph.
    pub fn for_graph(graph: &Graph) -> Self {
        Self {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
            story_arcs: graph.count_kind(NodeKind::StoryArc),
            quests: graph.count_kind(NodeKind::Quest),
            dialogues: graph.count_kind(NodeKind::Dialogue),
            ..Self::default()
        }
    }

    /// Counts for a single quest with the given number of incident edges.
    pub fn for_quest(edges: usize) -> Self {
        Self {
            total_nodes: 1,
            total_edges: edges,
            quests: 1,
            ..Self::default()
        }
    }
}

/// The outcome of validating a graph or a quest.
///
/// `is_valid` and `export_ready` are independent gates: a valid graph with
/// many warnings is not export-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// No error-level issues.
    pub is_valid: bool,
    /// No errors and fewer warnings than the export threshold.
    pub export_ready: bool,
    /// Error-level issues in detection order.
    pub errors: Vec<ValidationIssue>,
    /// Warning-level issues in detection order.
    pub warnings: Vec<ValidationIssue>,
    /// Counts for display.
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Partition issues by severity and derive the gates.
    pub fn from_issues(
        issues: Vec<ValidationIssue>,
        mut summary: ValidationSummary,
        config: &ValidationConfig,
    ) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);

        summary.error_count = errors.len();
        summary.warning_count = warnings.len();
        summary.by_type.clear();
        for issue in errors.iter().chain(&warnings) {
            *summary.by_type.entry(issue.kind).or_default() += 1;
        }

        let is_valid = errors.is_empty();
        let export_ready = is_valid && warnings.len() < config.max_warnings_for_export;

        Self {
            is_valid,
            export_ready,
            errors,
            warnings,
            summary,
        }
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Issues of one category.
    pub fn issues_of(&self, kind: IssueType) -> Vec<&ValidationIssue> {
        self.issues().filter(|i| i.kind == kind).collect()
    }
}

/// The short status view of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatus {
    /// No error-level issues.
    pub is_valid: bool,
    /// Export gate.
    pub export_ready: bool,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// When the validation ran.
    pub last_validated: DateTime<Utc>,
}

impl ValidationStatus {
    /// Status of a result produced just now.
    pub fn from_result(result: &ValidationResult) -> Self {
        Self::at(result, Utc::now())
    }

    /// Status of a result produced at a given time.
    pub fn at(result: &ValidationResult, when: DateTime<Utc>) -> Self {
        Self {
            is_valid: result.is_valid,
            export_ready: result.export_ready,
            error_count: result.errors.len(),
            warning_count: result.warnings.len(),
            last_validated: when,
        }
    }
}
