//! Backtracking chain construction.

use crate::config::Configuration;

use super::candidates::{next_ring_candidates, RingCandidate};

/// Explore every chain compatible with `cfg`'s current edge lengths.
///
/// Accepted chains (those passing `build_radius(step)`) are cloned into `out`.
/// `cfg.types()` and `cfg.npoly()` are left exactly as they were on entry;
/// `radius` and `hr` hold whatever the last attempted build wrote.
/// Returns the number of configurations appended.
pub fn explore_chains(cfg: &mut Configuration, step: f64, out: &mut Vec<Configuration>) -> usize {
    let before = out.len();
    ChainRunner { cfg, step, out }.recur(1);
    out.len() - before
}

/// Backtracking state over one shared configuration.
struct ChainRunner<'a> {
    cfg: &'a mut Configuration,
    step: f64,
    out: &'a mut Vec<Configuration>,
}

impl ChainRunner<'_> {
    fn recur(&mut self, ring: usize) {
        if ring >= self.cfg.n_rings() {
            match self.cfg.build_radius(self.step) {
                Ok(()) => self.out.push(self.cfg.clone()),
                Err(e) => tracing::trace!(%e, "chain rejected"),
            }
            return;
        }
        for cand in next_ring_candidates(self.cfg, ring) {
            let saved = (self.cfg.types[ring], self.cfg.npoly[ring]);
            self.cfg.types[ring] = cand.species;
            self.cfg.npoly[ring] = cand.sides;
            self.recur(ring + 1);
            (self.cfg.types[ring], self.cfg.npoly[ring]) = saved;
        }
    }
}

/// All geometrically consistent chains for `base`, as per-ring choices for
/// rings `1..N_rings`, without thickness validation.
///
/// Each binding works on its own copy of the partial chain, so `base` is never
/// touched. Slower than [`explore_chains`]; meant for checks and small inputs.
pub fn enumerate_chains(base: &Configuration) -> Vec<Vec<RingCandidate>> {
    fn extend(
        partial: &Configuration,
        ring: usize,
        chain: &[RingCandidate],
        out: &mut Vec<Vec<RingCandidate>>,
    ) {
        if ring >= partial.n_rings() {
            out.push(chain.to_vec());
            return;
        }
        for cand in next_ring_candidates(partial, ring) {
            let mut next = partial.clone();
            next.types[ring] = cand.species;
            next.npoly[ring] = cand.sides;
            let mut longer = chain.to_vec();
            longer.push(cand);
            extend(&next, ring + 1, &longer, out);
        }
    }

    let mut out = Vec::new();
    extend(base, 1, &[], &mut out);
    out
}
