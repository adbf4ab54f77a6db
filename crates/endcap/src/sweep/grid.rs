//! Nested edge-length loops over one (sub-)grid.
//!
//! Depth `d` in `1..N_species` owns the pair `(L2[d-1], L1[d])`:
//! - `L2[d-1] = round(L1[d-1]) + step * (k + 1)` while `<= L_max`,
//! - `L1[d] = L_min + step * j` while `<= L_max`, or `<= L2[last] - step` at the last depth.
//!
//! Coordinates come from integer indices, so a sub-grid (stride 2, per-depth
//! phase) reproduces the full grid's points bit for bit.

use crate::config::Configuration;

use super::phase::Phase;
use super::SearchError;

/// One walk over the edge-length grid.
#[derive(Clone, Debug)]
pub struct GridSweep {
    step: f64,
    stride: u64,
    phases: Vec<Phase>,
}

impl GridSweep {
    /// Every fine-grid point, single-threaded.
    pub fn full(step: f64) -> Self {
        Self {
            step,
            stride: 1,
            phases: Vec::new(),
        }
    }

    /// Every other fine-grid point per dimension, starting where `phases` say.
    ///
    /// `phases` needs one entry per sweep depth (`N_species - 1`);
    /// [`for_each_sample`](Self::for_each_sample) refuses any other length.
    pub fn interleaved(step: f64, phases: Vec<Phase>) -> Self {
        Self {
            step,
            stride: 2,
            phases,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set `cfg`'s swept edge lengths to each grid point in turn and call `visit`.
    ///
    /// Returns the number of points visited. `cfg` keeps the last point afterwards.
    pub fn for_each_sample<F>(
        &self,
        cfg: &mut Configuration,
        mut visit: F,
    ) -> Result<u64, SearchError>
    where
        F: FnMut(&mut Configuration),
    {
        let depths = cfg.n_species().saturating_sub(1);
        if self.stride != 1 && self.phases.len() != depths {
            return Err(SearchError::PhaseCountMismatch {
                phases: self.phases.len(),
                depths,
            });
        }
        let mut samples = 0;
        if depths > 0 {
            self.descend(cfg, 1, &mut visit, &mut samples);
        }
        Ok(samples)
    }

    fn descend<F>(&self, cfg: &mut Configuration, depth: usize, visit: &mut F, samples: &mut u64)
    where
        F: FnMut(&mut Configuration),
    {
        let (l_min, l_max) = (cfg.params.l_min, cfg.params.l_max);
        let last = cfg.n_species() - 1;
        let phase = self.phases.get(depth - 1).copied().unwrap_or_default();
        let origin = cfg.l1[depth - 1].round_ties_even();
        let l1_max = if depth == last {
            cfg.l2[last] - self.step
        } else {
            l_max
        };

        for k in self.indices(phase.l2_shift) {
            let l2 = origin + self.step * (k + 1) as f64;
            if l2 > l_max {
                break;
            }
            cfg.l2[depth - 1] = l2;
            for j in self.indices(phase.l1_shift) {
                let l1 = l_min + self.step * j as f64;
                if l1 > l1_max {
                    break;
                }
                cfg.l1[depth] = l1;
                if depth == last {
                    *samples += 1;
                    visit(cfg);
                } else {
                    self.descend(cfg, depth + 1, visit, samples);
                }
            }
        }
    }

    #[inline]
    fn indices(&self, shifted: bool) -> impl Iterator<Item = u64> {
        (u64::from(shifted)..).step_by(self.stride as usize)
    }
}
