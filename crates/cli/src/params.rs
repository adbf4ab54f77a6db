//! Parameter file: JSON with the key names of the detector optimisation config.
//!
//! Every key is optional; missing keys take the library defaults. Unknown keys
//! are rejected so typos do not silently fall back to a default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use endcap::{SearchParams, TolerancePolicy};
use serde::{Deserialize, Serialize};

/// Which inter-ring matching rule the file selects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Relative,
    Band,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsFile {
    #[serde(rename = "R_min")]
    pub r_min: f64,
    #[serde(rename = "R_max")]
    pub r_max: f64,
    #[serde(rename = "L_min")]
    pub l_min: f64,
    #[serde(rename = "L_max")]
    pub l_max: f64,
    #[serde(rename = "Hreal_min")]
    pub hreal_min: f64,
    #[serde(rename = "Hreal_max")]
    pub hreal_max: f64,
    pub costheta_min: f64,
    pub costheta_max: f64,
    pub tolerance_policy: PolicyKind,
    #[serde(rename = "Tolerance")]
    pub tolerance: f64,
    #[serde(rename = "Gap_tolerance")]
    pub gap_tolerance: f64,
    #[serde(rename = "Overlap_max_mm")]
    pub overlap_max_mm: f64,
    #[serde(rename = "N_species")]
    pub n_species: usize,
    #[serde(rename = "N_rings")]
    pub n_rings: usize,
    #[serde(rename = "N_min")]
    pub n_min: usize,
    #[serde(rename = "N_max")]
    pub n_max: usize,
    pub side_granularity: usize,
    #[serde(rename = "step_length")]
    pub step: f64,
    /// Wafer radius.
    #[serde(rename = "R")]
    pub wafer_radius: f64,
}

impl Default for ParamsFile {
    fn default() -> Self {
        let p = SearchParams::default();
        let tolerance = match p.tolerance {
            TolerancePolicy::Relative { tolerance } => tolerance,
            TolerancePolicy::Band { gap_tolerance, .. } => gap_tolerance,
        };
        Self {
            r_min: p.r_min,
            r_max: p.r_max,
            l_min: p.l_min,
            l_max: p.l_max,
            hreal_min: p.hreal_min,
            hreal_max: p.hreal_max,
            costheta_min: p.costheta_min,
            costheta_max: p.costheta_max,
            tolerance_policy: PolicyKind::Relative,
            tolerance,
            gap_tolerance: 1e-3,
            overlap_max_mm: 2.0,
            n_species: p.n_species,
            n_rings: p.n_rings,
            n_min: p.n_min,
            n_max: p.n_max,
            side_granularity: p.side_granularity,
            step: p.step,
            wafer_radius: p.wafer_radius,
        }
    }
}

impl ParamsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn to_params(&self) -> SearchParams {
        let tolerance = match self.tolerance_policy {
            PolicyKind::Relative => TolerancePolicy::Relative {
                tolerance: self.tolerance,
            },
            PolicyKind::Band => TolerancePolicy::Band {
                gap_tolerance: self.gap_tolerance,
                overlap_max: self.overlap_max_mm,
            },
        };
        SearchParams {
            r_min: self.r_min,
            r_max: self.r_max,
            l_min: self.l_min,
            l_max: self.l_max,
            hreal_min: self.hreal_min,
            hreal_max: self.hreal_max,
            costheta_min: self.costheta_min,
            costheta_max: self.costheta_max,
            tolerance,
            n_species: self.n_species,
            n_rings: self.n_rings,
            n_min: self.n_min,
            n_max: self.n_max,
            side_granularity: self.side_granularity,
            step: self.step,
            wafer_radius: self.wafer_radius,
        }
    }
}
