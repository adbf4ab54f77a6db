//! Search parameters and the mutable ring-chain configuration.
//!
//! - `SearchParams`: immutable scalar bounds, counts and tolerances (plain `Copy` data).
//! - `TolerancePolicy`: how a ring's inner boundary must match the previous ring's outer one.
//! - `Configuration`: per-species edge lengths and thicknesses plus per-ring side counts,
//!   species and radii. One instance is mutated in place by a search branch and cloned
//!   (deep copy) only when a chain is accepted.
//!
//! Radii are in millimetres throughout.

use std::f64::consts::PI;
use std::fmt;

use crate::polygon::{self, GeometryError};

/// Parameter record that cannot form a configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidParams { reason: String },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid search params: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Acceptance band for `r_next` (next ring's inner boundary) against `r`
/// (previous ring's outer boundary).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TolerancePolicy {
    /// `|r_next - r| / r <= tolerance`.
    Relative { tolerance: f64 },
    /// `r - overlap_max <= r_next <= r * (1 + gap_tolerance)`: rings may overlap
    /// by up to `overlap_max` mm and leave a relative gap of at most `gap_tolerance`.
    Band { gap_tolerance: f64, overlap_max: f64 },
}

impl TolerancePolicy {
    #[inline]
    pub fn accepts(&self, r: f64, r_next: f64) -> bool {
        match *self {
            Self::Relative { tolerance } => (r_next - r).abs() / r <= tolerance,
            Self::Band {
                gap_tolerance,
                overlap_max,
            } => r - overlap_max <= r_next && r_next <= r * (1.0 + gap_tolerance),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Relative { tolerance } => {
                if !(tolerance.is_finite() && tolerance >= 0.0) {
                    return Err(ConfigError::invalid("tolerance must be finite and >= 0"));
                }
            }
            Self::Band {
                gap_tolerance,
                overlap_max,
            } => {
                if !(gap_tolerance.is_finite() && gap_tolerance >= 0.0) {
                    return Err(ConfigError::invalid("gap tolerance must be finite and >= 0"));
                }
                if !(overlap_max.is_finite() && overlap_max >= 0.0) {
                    return Err(ConfigError::invalid("overlap max must be finite and >= 0"));
                }
            }
        }
        Ok(())
    }
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self::Relative { tolerance: 1e-3 }
    }
}

impl fmt::Display for TolerancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative { tolerance } => write!(f, "relative (tolerance {tolerance:.2e})"),
            Self::Band {
                gap_tolerance,
                overlap_max,
            } => write!(
                f,
                "band (gap {gap_tolerance:.2e}, overlap max {overlap_max:.2} mm)"
            ),
        }
    }
}

/// Scalar bounds, counts and tolerances governing one search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    /// Inner boundary of the first ring.
    pub r_min: f64,
    /// Outer boundary of the last ring; also caps every intermediate ring.
    pub r_max: f64,
    pub l_min: f64,
    pub l_max: f64,
    pub hreal_min: f64,
    pub hreal_max: f64,
    pub costheta_min: f64,
    pub costheta_max: f64,
    pub tolerance: TolerancePolicy,
    pub n_species: usize,
    pub n_rings: usize,
    /// Side count of the first ring.
    pub n_min: usize,
    /// Side count of the last ring.
    pub n_max: usize,
    /// Intermediate side counts must be multiples of this.
    pub side_granularity: usize,
    /// Fine grid spacing of the edge-length sweep and of the thickness scan.
    pub step: f64,
    /// Radius of the wafer modules are cut from.
    pub wafer_radius: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            r_min: 414.0,
            r_max: 690.0,
            l_min: 25.0,
            l_max: 85.0,
            hreal_min: 75.0,
            hreal_max: 145.0,
            costheta_min: 0.7,
            costheta_max: 1.0,
            tolerance: TolerancePolicy::default(),
            n_species: 3,
            n_rings: 3,
            n_min: 48,
            n_max: 64,
            side_granularity: 4,
            step: 0.5,
            wafer_radius: 101.5,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            self.r_min,
            self.r_max,
            self.l_min,
            self.l_max,
            self.hreal_min,
            self.hreal_max,
            self.costheta_min,
            self.costheta_max,
            self.step,
            self.wafer_radius,
        ];
        if scalars.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::invalid("bounds must be finite"));
        }
        if self.step <= 0.0 {
            return Err(ConfigError::invalid("step must be > 0"));
        }
        if !(0.0 < self.r_min && self.r_min < self.r_max) {
            return Err(ConfigError::invalid("0 < R_min < R_max required"));
        }
        if !(0.0 < self.l_min && self.l_min <= self.l_max) {
            return Err(ConfigError::invalid("0 < L_min <= L_max required"));
        }
        if !(0.0 < self.hreal_min && self.hreal_min <= self.hreal_max) {
            return Err(ConfigError::invalid("0 < Hreal_min <= Hreal_max required"));
        }
        if self.costheta_min >= self.costheta_max {
            return Err(ConfigError::invalid("costheta_min < costheta_max required"));
        }
        if self.n_species == 0 {
            return Err(ConfigError::invalid("need at least one species"));
        }
        if self.n_rings < 2 {
            return Err(ConfigError::invalid("need at least two rings"));
        }
        if self.n_min < 3 || self.n_max < 3 {
            return Err(ConfigError::invalid("N_min and N_max must be >= 3"));
        }
        if self.side_granularity == 0 {
            return Err(ConfigError::invalid("side granularity must be >= 1"));
        }
        if self.wafer_radius <= 0.0 {
            return Err(ConfigError::invalid("wafer radius must be > 0"));
        }
        self.tolerance.validate()
    }

    /// `L1` of species 0: puts the first ring's inner boundary on `r_min`.
    pub fn first_inner_edge(&self) -> f64 {
        2.0 * self.r_min * (PI / self.n_min as f64).sin()
    }

    /// `L2` of the last species: puts the last ring's outer boundary on `r_max`.
    pub fn last_outer_edge(&self) -> f64 {
        2.0 * self.r_max * (PI / self.n_max as f64).tan()
    }
}

/// Inner (circumscribed by the L1 polygon) and outer (inscribed in the L2
/// polygon) boundary radius of one ring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingRadius {
    pub inner: f64,
    pub outer: f64,
}

impl RingRadius {
    #[inline]
    pub fn height(&self) -> f64 {
        self.outer - self.inner
    }
}

/// One candidate endcap design.
///
/// Invariants: `types[0] == 0`, `npoly[0] == n_min`, `types[last] == n_species - 1`,
/// `npoly[last] == n_max`; every entry of `types` is `< n_species`.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub(crate) params: SearchParams,
    pub(crate) l1: Vec<f64>,
    pub(crate) l2: Vec<f64>,
    pub(crate) hr: Vec<f64>,
    pub(crate) npoly: Vec<usize>,
    pub(crate) types: Vec<usize>,
    pub(crate) radius: Vec<RingRadius>,
}

impl Configuration {
    /// Base configuration with the anchor edges and the fixed first/last rings set.
    pub fn new(params: SearchParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let (ns, nr) = (params.n_species, params.n_rings);
        let mut cfg = Self {
            params,
            l1: vec![0.0; ns],
            l2: vec![0.0; ns],
            hr: vec![0.0; ns],
            npoly: vec![0; nr],
            types: vec![0; nr],
            radius: vec![RingRadius::default(); nr],
        };
        cfg.l1[0] = params.first_inner_edge();
        cfg.l2[ns - 1] = params.last_outer_edge();
        cfg.npoly[0] = params.n_min;
        cfg.npoly[nr - 1] = params.n_max;
        cfg.types[0] = 0;
        cfg.types[nr - 1] = ns - 1;
        Ok(cfg)
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
    pub fn n_species(&self) -> usize {
        self.params.n_species
    }
    pub fn n_rings(&self) -> usize {
        self.params.n_rings
    }
    pub fn l1(&self) -> &[f64] {
        &self.l1
    }
    pub fn l2(&self) -> &[f64] {
        &self.l2
    }
    /// Resolved sensor thickness per species (0 until validated).
    pub fn hr(&self) -> &[f64] {
        &self.hr
    }
    pub fn npoly(&self) -> &[usize] {
        &self.npoly
    }
    pub fn types(&self) -> &[usize] {
        &self.types
    }
    pub fn radius(&self) -> &[RingRadius] {
        &self.radius
    }

    /// Overwrite both edge lengths of `species`.
    pub fn set_species_edges(
        &mut self,
        species: usize,
        l1: f64,
        l2: f64,
    ) -> Result<(), ConfigError> {
        if species >= self.n_species() {
            return Err(ConfigError::invalid(format!(
                "species {species} out of range (N_species = {})",
                self.n_species()
            )));
        }
        self.l1[species] = l1;
        self.l2[species] = l2;
        Ok(())
    }

    /// Assign species and side count to an intermediate ring.
    pub fn assign_ring(
        &mut self,
        ring: usize,
        species: usize,
        sides: usize,
    ) -> Result<(), ConfigError> {
        if ring == 0 || ring + 1 >= self.n_rings() {
            return Err(ConfigError::invalid(format!(
                "ring {ring} is fixed or out of range (N_rings = {})",
                self.n_rings()
            )));
        }
        if species >= self.n_species() {
            return Err(ConfigError::invalid(format!(
                "species {species} out of range (N_species = {})",
                self.n_species()
            )));
        }
        if sides < 3 {
            return Err(ConfigError::invalid("a ring needs at least 3 sides"));
        }
        self.types[ring] = species;
        self.npoly[ring] = sides;
        Ok(())
    }

    /// Inner boundary of `ring` from its current species and side count.
    pub fn inner_radius(&self, ring: usize) -> Result<f64, GeometryError> {
        polygon::circumscribed_radius(self.l1[self.types[ring]], self.npoly[ring])
    }

    /// Outer boundary of `ring` from its current species and side count.
    pub fn outer_radius(&self, ring: usize) -> Result<f64, GeometryError> {
        polygon::inscribed_radius(self.l2[self.types[ring]], self.npoly[ring])
    }

    /// Radial extent of a built ring.
    pub fn ring_height(&self, ring: usize) -> f64 {
        self.radius[ring].height()
    }

    /// Ring height over the resolved thickness of its species (cosine of the tilt).
    pub fn tilt_ratio(&self, ring: usize) -> f64 {
        self.ring_height(ring) / self.hr[self.types[ring]]
    }

    /// Tallest module of `species` that still fits the wafer.
    pub fn wafer_height_limit(&self, species: usize) -> Result<f64, GeometryError> {
        polygon::max_module_height(self.l1[species], self.l2[species], self.params.wafer_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_configuration_anchors() {
        let cfg = Configuration::new(SearchParams::default()).unwrap();
        assert_eq!(cfg.npoly(), &[48, 0, 64]);
        assert_eq!(cfg.types(), &[0, 0, 2]);
        assert!((cfg.inner_radius(0).unwrap() - 414.0).abs() < 1e-9);
        assert!((cfg.l1()[0] - 54.1538).abs() < 1e-3);
        assert!((cfg.l2()[2] - 67.7951).abs() < 1e-3);
        assert!(cfg.hr().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn clone_is_detached() {
        let mut cfg = Configuration::new(SearchParams::default()).unwrap();
        let snapshot = cfg.clone();
        cfg.set_species_edges(1, 40.0, 50.0).unwrap();
        cfg.assign_ring(1, 1, 56).unwrap();
        assert_eq!(snapshot.l1()[1], 0.0);
        assert_eq!(snapshot.npoly()[1], 0);
        assert_ne!(snapshot, cfg);
    }

    #[test]
    fn fixed_rings_cannot_be_assigned() {
        let mut cfg = Configuration::new(SearchParams::default()).unwrap();
        assert!(cfg.assign_ring(0, 1, 48).is_err());
        assert!(cfg.assign_ring(2, 1, 48).is_err());
        assert!(cfg.assign_ring(1, 3, 48).is_err());
        assert!(cfg.assign_ring(1, 1, 2).is_err());
        assert!(cfg.set_species_edges(3, 1.0, 2.0).is_err());
    }

    #[test]
    fn invalid_params_rejected() {
        let bad = [
            SearchParams {
                step: 0.0,
                ..SearchParams::default()
            },
            SearchParams {
                n_rings: 1,
                ..SearchParams::default()
            },
            SearchParams {
                n_min: 2,
                ..SearchParams::default()
            },
            SearchParams {
                r_min: 700.0,
                ..SearchParams::default()
            },
            SearchParams {
                side_granularity: 0,
                ..SearchParams::default()
            },
            SearchParams {
                costheta_min: 1.0,
                ..SearchParams::default()
            },
            SearchParams {
                hreal_max: f64::NAN,
                ..SearchParams::default()
            },
            SearchParams {
                tolerance: TolerancePolicy::Relative { tolerance: -1.0 },
                ..SearchParams::default()
            },
        ];
        for p in bad {
            assert!(Configuration::new(p).is_err(), "{p:?}");
        }
    }

    #[test]
    fn tolerance_policies() {
        let rel = TolerancePolicy::Relative { tolerance: 1e-3 };
        assert!(rel.accepts(500.0, 500.4));
        assert!(rel.accepts(500.0, 499.6));
        assert!(!rel.accepts(500.0, 500.6));

        let band = TolerancePolicy::Band {
            gap_tolerance: 1e-3,
            overlap_max: 2.0,
        };
        // Overlap of up to 2 mm is fine, a gap only up to ~0.5 mm at r = 500.
        assert!(band.accepts(500.0, 498.0));
        assert!(!band.accepts(500.0, 497.9));
        assert!(band.accepts(500.0, 500.4));
        assert!(!band.accepts(500.0, 500.6));
        assert!(band.to_string().starts_with("band"));
    }
}
