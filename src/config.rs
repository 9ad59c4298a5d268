use serde::{Deserialize, Serialize};

use crate::error::StereoError;

/// Tolerances and policy for geometry perception.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Largest sine of the angle between the two focus-ligand lines of an
    /// axis.
    #[serde(default = "default_collinear_tolerance")]
    pub collinear_tolerance: f64,
    /// Largest out-of-plane distance of the focus or a ligand, relative to
    /// the mean focus-ligand distance.
    #[serde(default = "default_coplanar_tolerance")]
    pub coplanar_tolerance: f64,
    /// Reject trigonal-bipyramidal and octahedral centers where more than
    /// one axis passes both tests, instead of taking the first.
    #[serde(default)]
    pub unique_axis: bool,
}

pub const DEFAULT_COLLINEAR_TOLERANCE: f64 = 0.05;
pub const DEFAULT_COPLANAR_TOLERANCE: f64 = 0.05;

fn default_collinear_tolerance() -> f64 {
    DEFAULT_COLLINEAR_TOLERANCE
}

fn default_coplanar_tolerance() -> f64 {
    DEFAULT_COPLANAR_TOLERANCE
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            collinear_tolerance: DEFAULT_COLLINEAR_TOLERANCE,
            coplanar_tolerance: DEFAULT_COPLANAR_TOLERANCE,
            unique_axis: false,
        }
    }
}

impl PerceptionConfig {
    pub fn validate(&self) -> Result<(), StereoError> {
        check_tolerance("collinear_tolerance", self.collinear_tolerance)?;
        check_tolerance("coplanar_tolerance", self.coplanar_tolerance)
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), StereoError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StereoError::InvalidTolerance { name, value })
    }
}
