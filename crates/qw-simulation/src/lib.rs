//! Seeded playthrough simulation for Questweave.
//!
//! A [`Simulation`] drives a synthetic player through the quests of one
//! story arc, tracking stats, reputation, alignment, inventory, and flags,
//! and records everything in an ordered event log. Runs are independent and
//! reproducible from their seed. [`analytics`] aggregates finished results.

/// Aggregation over finished results.
pub mod analytics;
/// Parallel batch runs.
pub mod batch;
/// Simulated play time.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Reputation and alignment consequences.
pub mod effects;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Player state and its transitions.
pub mod player;
/// Requests against a whole project.
pub mod request;
/// Success roll, rewards, choices, and duration.
pub mod resolve;
/// Finished runs.
pub mod result;
/// Quest selection by play style.
pub mod selection;
/// The run orchestrator.
pub mod simulation;
/// Result persistence.
pub mod store;

pub use analytics::{Analysis, Comparison, analyze, compare};
pub use batch::{BatchSummary, run_batch, save_all};
pub use clock::SimClock;
pub use config::{PlayStyle, SimConfig};
pub use error::{SimError, SimResult};
pub use event::{EventLog, EventSeverity, SimEvent, SimEventKind};
pub use player::{Alignment, PlayerOverrides, PlayerState, QuestStatus};
pub use request::{SimulationRequest, run_request, run_request_with};
pub use result::{ResultSummary, SimulationResult, Termination};
pub use simulation::{RunInfo, Simulation};
pub use store::{JsonDirStore, MemoryStore, ResultStore};
