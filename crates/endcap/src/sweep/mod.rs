//! Edge-length grid sweep and its thread partition.
//!
//! Purpose
//! - Enumerate every `(L2[d-1], L1[d])` grid point for `d = 1..N_species` at spacing
//!   `step`, and run the chain builder on each leaf sample.
//!
//! Partition
//! - Each of the `2 * (N_species - 1)` swept dimensions is split by index parity,
//!   giving `4^(N_species - 1)` disjoint interleaved sub-grids at stride `2 * step`.
//!   Their union is exactly the full grid. One scoped worker thread per sub-grid,
//!   each with a private deep copy of the base configuration and a private result
//!   list; the driver joins all workers and concatenates.
//! - Workers return their sample counts; no state is shared while sweeping.
//!
//! Limits
//! - No cancellation or timeout: the driver blocks until every worker finishes.
//! - `N_species < 3` is refused up front. A refused thread spawn aborts the search
//!   with `SearchError::SpawnFailed` once the running workers have finished.

mod grid;
mod phase;

pub use grid::GridSweep;
pub use phase::{phase_tuples, Phase};

use std::fmt;
use std::io;
use std::thread;

use crate::chain::explore_chains;
use crate::config::{ConfigError, Configuration, SearchParams};

/// Why a search did not run to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// The partitioned sweep needs two boundary species plus at least one more.
    UnsupportedSpeciesCount { n_species: usize },
    InvalidParams(ConfigError),
    /// The OS refused a worker thread.
    SpawnFailed { worker: usize, reason: String },
    WorkerPanicked { worker: usize },
    /// An interleaved sweep needs one phase per sweep depth.
    PhaseCountMismatch { phases: usize, depths: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSpeciesCount { n_species } => {
                write!(f, "unsupported number of species: {n_species} (need >= 3)")
            }
            Self::InvalidParams(e) => write!(f, "{e}"),
            Self::SpawnFailed { worker, reason } => {
                write!(f, "could not spawn sweep worker {worker}: {reason}")
            }
            Self::WorkerPanicked { worker } => write!(f, "sweep worker {worker} panicked"),
            Self::PhaseCountMismatch { phases, depths } => {
                write!(f, "interleaved sweep got {phases} phases for {depths} depths")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidParams(e)
    }
}

/// Accepted configurations of one search plus diagnostics.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Parameters (including the tolerance policy) every result was judged under.
    pub params: SearchParams,
    /// Accepted configurations; order is unspecified.
    pub configurations: Vec<Configuration>,
    /// Leaf samples visited across all workers.
    pub samples: u64,
    pub workers: usize,
}

struct WorkerOutput {
    configurations: Vec<Configuration>,
    samples: u64,
}

fn run_worker(cfg: &mut Configuration, sweep: &GridSweep) -> Result<WorkerOutput, SearchError> {
    let step = sweep.step();
    let mut configurations = Vec::new();
    let samples = sweep.for_each_sample(cfg, |sample| {
        explore_chains(sample, step, &mut configurations);
    })?;
    Ok(WorkerOutput {
        configurations,
        samples,
    })
}

fn spawn_failed(worker: usize, e: io::Error) -> SearchError {
    tracing::error!(worker, %e, "worker thread refused");
    SearchError::SpawnFailed {
        worker,
        reason: e.to_string(),
    }
}

fn check_species(params: &SearchParams) -> Result<(), SearchError> {
    if params.n_species < 3 {
        tracing::warn!(
            n_species = params.n_species,
            "unsupported number of species; sweep skipped"
        );
        return Err(SearchError::UnsupportedSpeciesCount {
            n_species: params.n_species,
        });
    }
    Ok(())
}

/// Full search, one worker thread per phase tuple.
pub fn run_search(params: SearchParams) -> Result<SearchOutcome, SearchError> {
    check_species(&params)?;
    let base = Configuration::new(params)?;
    let tuples = phase_tuples(params.n_species - 1);
    let workers = tuples.len();
    tracing::info!(
        workers,
        step = params.step,
        tolerance = %params.tolerance,
        granularity = params.side_granularity,
        "starting sweep"
    );

    // Workers already running when a spawn fails are joined at scope exit.
    let outputs = thread::scope(|s| {
        let handles = tuples
            .into_iter()
            .enumerate()
            .map(|(worker, phases)| {
                let mut cfg = base.clone();
                let sweep = GridSweep::interleaved(params.step, phases);
                thread::Builder::new()
                    .name(format!("sweep-{worker}"))
                    .spawn_scoped(s, move || run_worker(&mut cfg, &sweep))
                    .map_err(|e| spawn_failed(worker, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        handles
            .into_iter()
            .enumerate()
            .map(|(worker, h)| {
                h.join()
                    .map_err(|_| SearchError::WorkerPanicked { worker })
                    .and_then(|out| out)
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut outcome = SearchOutcome {
        params,
        configurations: Vec::new(),
        samples: 0,
        workers,
    };
    for (worker, out) in outputs.into_iter().enumerate() {
        tracing::debug!(
            worker,
            samples = out.samples,
            accepted = out.configurations.len(),
            "worker done"
        );
        outcome.samples += out.samples;
        outcome.configurations.extend(out.configurations);
    }
    tracing::info!(
        samples = outcome.samples,
        accepted = outcome.configurations.len(),
        "sweep finished"
    );
    Ok(outcome)
}

/// Same search on the calling thread over the full grid.
pub fn run_search_serial(params: SearchParams) -> Result<SearchOutcome, SearchError> {
    check_species(&params)?;
    let mut cfg = Configuration::new(params)?;
    let out = run_worker(&mut cfg, &GridSweep::full(params.step))?;
    Ok(SearchOutcome {
        params,
        configurations: out.configurations,
        samples: out.samples,
        workers: 1,
    })
}
