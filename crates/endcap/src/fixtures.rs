//! Shared test configurations.

use crate::config::{Configuration, SearchParams};

/// Default bounds with a 2 mm grid.
pub(crate) fn coarse_params() -> SearchParams {
    SearchParams {
        step: 2.0,
        ..SearchParams::default()
    }
}

/// Three-ring chain (48, 56, 64 sides; species 0, 1, 2) found by the 2 mm sweep
/// over the default bounds. Ring 1 is assigned; nothing is built yet.
pub(crate) fn known_chain() -> Configuration {
    let mut cfg = Configuration::new(coarse_params()).unwrap();
    cfg.l2[0] = 62.0;
    cfg.l1[1] = 53.0;
    cfg.l2[1] = 63.0;
    cfg.l1[2] = 55.0;
    cfg.assign_ring(1, 1, 56).unwrap();
    cfg
}

/// `known_chain` before ring 1 is chosen (the state the chain builder starts from).
pub(crate) fn known_sample() -> Configuration {
    let mut cfg = known_chain();
    cfg.types[1] = 0;
    cfg.npoly[1] = 0;
    cfg
}
