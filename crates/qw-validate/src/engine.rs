use qw_core::{Graph, NodeKind, Project, QuestRecord, QwError, QwResult, RecordId};

use crate::checks::{chains, conditions, cycles, orphans, reachability, structure};
use crate::config::ValidationConfig;
use crate::issue::ValidationIssue;
use crate::report::{ValidationResult, ValidationSummary};

/// Run one pass and log how many issues it added.
fn pass(
    name: &str,
    issues: &mut Vec<ValidationIssue>,
    check: impl FnOnce(&mut Vec<ValidationIssue>),
) {
    let before = issues.len();
    check(issues);
    tracing::debug!(pass = name, found = issues.len() - before, "validation pass");
}

/// Validate a whole graph with the default policy.
pub fn validate_graph(graph: &Graph) -> ValidationResult {
    validate_graph_with(graph, &ValidationConfig::default())
}

/// Validate a whole graph.
///
/// Passes run in a fixed order over deterministic iteration, so validating an
/// unchanged graph twice yields identical results.
pub fn validate_graph_with(graph: &Graph, config: &ValidationConfig) -> ValidationResult {
    let mut issues = Vec::new();

    pass("orphans", &mut issues, |i| orphans::check_orphans(graph, i));
    pass("reachability", &mut issues, |i| {
        reachability::check_reachability(graph, i)
    });
    pass("broken_chain", &mut issues, |i| chains::check_broken_chains(graph, i));
    pass("cycles", &mut issues, |i| cycles::check_cycles(graph, i));
    pass("missing_prerequisites", &mut issues, |i| {
        chains::check_all_prerequisites(graph, i)
    });
    pass("conditions", &mut issues, |i| conditions::check_conditions(graph, i));
    pass("structure", &mut issues, |i| {
        for (_, quest) in graph.quests() {
            structure::check_quest_structure(quest, config, i);
        }
    });

    let result = ValidationResult::from_issues(issues, ValidationSummary::for_graph(graph), config);
    tracing::info!(
        nodes = result.summary.total_nodes,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        export_ready = result.export_ready,
        "validated graph"
    );
    result
}

/// Validate every story arc, quest, and dialogue of a project.
pub fn validate_project(project: &Project) -> ValidationResult {
    validate_graph(&Graph::from_project(project))
}

/// Quest-local validation: structure and condition rules only.
pub fn validate_quest(quest: &QuestRecord) -> ValidationResult {
    validate_quest_with(quest, &ValidationConfig::default())
}

/// Quest-local validation with an explicit policy.
pub fn validate_quest_with(quest: &QuestRecord, config: &ValidationConfig) -> ValidationResult {
    let mut issues = Vec::new();
    structure::check_quest_structure(quest, config, &mut issues);
    conditions::check_quest_conditions(quest, &mut issues);

    let links = quest.prerequisite_quests().count() + quest.next_quests().count();
    ValidationResult::from_issues(issues, ValidationSummary::for_quest(links), config)
}

/// Quest-local validation of a quest inside a built graph. Adds the
/// prerequisite checks that need the rest of the graph.
pub fn validate_quest_in(graph: &Graph, quest_id: &str) -> QwResult<ValidationResult> {
    let config = ValidationConfig::default();
    let not_found = || QwError::QuestNotFound(RecordId::from(quest_id));

    let idx = graph.find(quest_id).ok_or_else(not_found)?;
    let node = graph.node(idx);
    if node.kind != NodeKind::Quest {
        return Err(not_found());
    }
    let quest = node.as_quest().ok_or_else(not_found)?;

    let mut issues = Vec::new();
    structure::check_quest_structure(quest, &config, &mut issues);
    conditions::check_quest_conditions(quest, &mut issues);
    chains::check_missing_prerequisites(graph, quest, &mut issues);
    chains::check_broken_chain(graph, idx, quest, &mut issues);

    let edges = graph.edges_to(idx).count() + graph.edges_from(idx).count();
    Ok(ValidationResult::from_issues(
        issues,
        ValidationSummary::for_quest(edges),
        &config,
    ))
}
