//! Independent check passes. Each pass reads the graph and appends the
//! issues it finds; none of them mutates shared state.

/// Broken chains and missing prerequisites.
pub mod chains;
/// Condition grammar checks.
pub mod conditions;
/// Dependency loops.
pub mod cycles;
/// Nodes without any edge.
pub mod orphans;
/// Nodes no story entry point leads to.
pub mod reachability;
/// Quest-structure rules.
pub mod structure;
