//! Next-ring compatibility test.

use crate::config::Configuration;
use crate::polygon;

/// One admissible choice for a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RingCandidate {
    pub species: usize,
    pub sides: usize,
}

/// Species (with their snapped side counts) that can follow ring `ring - 1`.
///
/// Rings `0..ring` must already be assigned. For the last ring only the fixed
/// species and `N_max` sides are tested; intermediate rings try every species in
/// index order and additionally require the new inner boundary to stay within
/// `R_max`. Misuse (`ring == 0` or past the last ring) yields no candidates.
pub fn next_ring_candidates(cfg: &Configuration, ring: usize) -> Vec<RingCandidate> {
    let n_rings = cfg.n_rings();
    if ring < 1 || ring >= n_rings {
        tracing::warn!(ring, n_rings, "next ring must lie in 1..N_rings");
        return Vec::new();
    }
    let Ok(r) = cfg.outer_radius(ring - 1) else {
        return Vec::new();
    };
    let p = cfg.params();

    if ring + 1 == n_rings {
        let fixed = RingCandidate {
            species: cfg.types[ring],
            sides: cfg.npoly[ring],
        };
        return match cfg.inner_radius(ring) {
            Ok(r_next) if p.tolerance.accepts(r, r_next) => vec![fixed],
            _ => Vec::new(),
        };
    }

    (0..cfg.n_species())
        .filter_map(|species| {
            let edge = cfg.l1[species];
            let n_star = polygon::sides_for_chord(r, edge).ok()?;
            let sides = polygon::snap_sides(n_star, p.side_granularity)?;
            let r_next = polygon::circumscribed_radius(edge, sides).ok()?;
            (p.tolerance.accepts(r, r_next) && r_next <= p.r_max)
                .then_some(RingCandidate { species, sides })
        })
        .collect()
}
