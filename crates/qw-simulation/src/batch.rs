use qw_core::Project;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::request::{SimulationRequest, run_request};
use crate::result::{ResultSummary, SimulationResult};
use crate::store::ResultStore;

/// Run every request independently and in parallel. Results come back in
/// request order.
pub fn run_batch(
    project: &Project,
    requests: &[SimulationRequest],
) -> Vec<SimResult<SimulationResult>> {
    let outcomes: Vec<_> = requests
        .par_iter()
        .map(|request| run_request(project, request))
        .collect();
    tracing::info!(
        requests = requests.len(),
        failed = outcomes.iter().filter(|o| o.is_err()).count(),
        "batch finished"
    );
    outcomes
}

/// Persist results as independent writes. One failed write does not stop
/// the others.
pub fn save_all<S: ResultStore + Sync + ?Sized>(
    store: &S,
    results: &[SimulationResult],
) -> Vec<SimResult<()>> {
    results.par_iter().map(|r| store.save(r)).collect()
}

/// What a batch produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Requests submitted.
    pub total: usize,
    /// Runs that produced a result.
    pub succeeded: usize,
    /// Runs that aborted.
    pub failed: usize,
    /// Condensed results of the successful runs.
    pub results: Vec<ResultSummary>,
    /// Error messages of the aborted runs.
    pub errors: Vec<String>,
}

impl BatchSummary {
    /// Summarize batch outcomes.
    pub fn from_outcomes(outcomes: &[SimResult<SimulationResult>]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(result) => {
                    summary.succeeded += 1;
                    summary.results.push(result.summary());
                }
                Err(e) => {
                    summary.failed += 1;
                    summary.errors.push(e.to_string());
                }
            }
        }
        summary
    }
}
