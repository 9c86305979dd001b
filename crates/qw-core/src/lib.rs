//! Core types for Questweave: narrative content records, the condition
//! grammar, and the narrative graph.
//!
//! Records arrive from the authoring backend as JSON. [`build_graph`] turns
//! them into a [`Graph`] that the validator and the simulator consume.

/// Graph Builder: records to graph.
pub mod builder;
/// Condition records and the closed condition grammar.
pub mod condition;
/// Error types used throughout the crate.
pub mod error;
/// The arena-backed narrative graph.
pub mod graph;
/// Persisted content records.
pub mod record;

/// Re-export the graph builder.
pub use builder::build_graph;
/// Re-export condition types.
pub use condition::{
    Condition, ConditionError, ConditionRecord, ConditionType, ConditionValue, Operator,
};
/// Re-export error types.
pub use error::{QwError, QwResult};
/// Re-export graph types.
pub use graph::{
    Edge, EdgeIndex, EdgeKind, EdgePayload, Graph, Node, NodeIndex, NodeKind, NodePayload,
};
/// Re-export record types.
pub use record::{
    CharacterRecord, DialogueRecord, Difficulty, OutcomeKind, OutcomeRecord, Project, QuestRecord,
    QuestType, RecordId, Reward, RewardKind, StoryArcRecord,
};
