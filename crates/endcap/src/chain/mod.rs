//! Ring-chain construction for a fixed edge-length assignment.
//!
//! Purpose
//! - Starting from the fixed innermost ring, extend the chain one ring at a time:
//!   the next ring's inner boundary (L1 polygon, circumscribed) must match the
//!   previous ring's outer boundary (L2 polygon, inscribed) under the active
//!   `TolerancePolicy`, with a side count snapped to `side_granularity`.
//! - Complete chains go through `Configuration::build_radius`; survivors are
//!   deep-copied into the caller's result list.
//!
//! Layout
//! - `candidates.rs`: species/side-count choices for one ring.
//! - `builder.rs`: backtracking over a single shared `Configuration` (hot path,
//!   no allocation per branch) and an allocation-per-binding enumeration used as
//!   a cross-check.

mod builder;
mod candidates;

pub use builder::{enumerate_chains, explore_chains};
pub use candidates::{next_ring_candidates, RingCandidate};
