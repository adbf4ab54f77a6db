//! Endcap ring-layout search.
//!
//! Finds chains of concentric polygonal rings of trapezoidal sensor modules
//! where each ring's outer boundary meets the next ring's inner boundary within
//! tolerance, and every module species admits one sensor thickness keeping all
//! its rings inside the tilt window.
//!
//! Layers (leaf to root)
//! - `polygon`: regular-polygon radius/side-count relations.
//! - `config`: search parameters, tolerance policy, the mutable configuration.
//! - `validate`: ring radii and per-species thickness resolution.
//! - `chain`: next-ring candidates and backtracking chain construction.
//! - `sweep`: edge-length grid sweep partitioned across worker threads.

pub mod chain;
pub mod config;
pub mod polygon;
pub mod sweep;
pub mod validate;

#[cfg(test)]
mod fixtures;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{ConfigError, Configuration, RingRadius, SearchParams, TolerancePolicy};
pub use sweep::{run_search, run_search_serial, SearchError, SearchOutcome};

/// Common exports for callers.
pub mod prelude {
    pub use crate::chain::{enumerate_chains, explore_chains, next_ring_candidates, RingCandidate};
    pub use crate::config::{ConfigError, Configuration, RingRadius, SearchParams, TolerancePolicy};
    pub use crate::polygon::{
        circumscribed_radius, inscribed_radius, max_module_height, sides_for_chord, snap_sides,
        GeometryError,
    };
    pub use crate::sweep::{
        phase_tuples, run_search, run_search_serial, GridSweep, Phase, SearchError, SearchOutcome,
    };
    pub use crate::validate::BuildError;
}
