//! Consistency checks over the Questweave narrative graph.
//!
//! Every check is an independent pass that reports problems as
//! [`ValidationIssue`]s. Content problems never become `Err`: the validator
//! always answers with a [`ValidationResult`].

/// The check passes.
pub mod checks;
/// Validation policy.
pub mod config;
/// Entry points that run the passes and merge their results.
pub mod engine;
/// Issue types and severities.
pub mod issue;
/// Results, summaries, and the status view.
pub mod report;

pub use config::ValidationConfig;
pub use engine::{
    validate_graph, validate_graph_with, validate_project, validate_quest, validate_quest_in,
    validate_quest_with,
};
pub use issue::{IssueType, Severity, ValidationIssue};
pub use report::{ValidationResult, ValidationStatus, ValidationSummary};
