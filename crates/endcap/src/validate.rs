//! Radius build and per-species sensor thickness resolution.
//!
//! For a fully assigned chain every ring gets its `(inner, outer)` boundary pair,
//! then each species scans thicknesses `h = Hreal_min + i * step` upward and keeps
//! the first one for which every ring of that species satisfies
//! `h * costheta_min < height < h * costheta_max` (open interval on both ends).

use std::fmt;

use crate::config::{Configuration, RingRadius};
use crate::polygon::GeometryError;

/// Why a fully assigned chain was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuildError {
    /// No thickness on the scan grid fits every ring of `species`.
    NoThickness { species: usize },
    /// A ring radius could not be computed.
    Geometry(GeometryError),
    /// The thickness scan step is not a positive finite number.
    InvalidStep { step: f64 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoThickness { species } => {
                write!(f, "no valid sensor thickness for species {species}")
            }
            Self::Geometry(e) => write!(f, "ring radius: {e}"),
            Self::InvalidStep { step } => write!(f, "thickness scan step must be > 0 (got {step})"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for BuildError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

impl Configuration {
    /// Compute all ring radii and resolve `Hr` per species.
    ///
    /// On success `radius()` and `hr()` are final for this instance. On failure
    /// they may be partially overwritten and the candidate is to be discarded.
    pub fn build_radius(&mut self, step: f64) -> Result<(), BuildError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(BuildError::InvalidStep { step });
        }
        for ring in 0..self.n_rings() {
            self.radius[ring] = RingRadius {
                inner: self.inner_radius(ring)?,
                outer: self.outer_radius(ring)?,
            };
        }
        for species in 0..self.n_species() {
            let h = self
                .scan_thickness(species, step)
                .ok_or(BuildError::NoThickness { species })?;
            self.hr[species] = h;
        }
        Ok(())
    }

    fn scan_thickness(&self, species: usize, step: f64) -> Option<f64> {
        let p = &self.params;
        (0u64..)
            .map(|i| p.hreal_min + step * i as f64)
            .take_while(|&h| h <= p.hreal_max)
            .find(|&h| {
                self.types
                    .iter()
                    .zip(&self.radius)
                    .filter(|&(&t, _)| t == species)
                    .all(|(_, r)| {
                        let height = r.height();
                        h * p.costheta_min < height && height < h * p.costheta_max
                    })
            })
    }
}
