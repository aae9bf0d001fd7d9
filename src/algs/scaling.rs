//! Per-axis scaling of unit cells and assembled volumes.
//!
//! Scaling multiplies every coordinate component-wise. For a unit cell the
//! periodicity vectors are scaled the same way so the cell still tiles
//! without gaps. Node and element ids, counts and connectivity are untouched.

use crate::geometry::equality::Point3;
use crate::mesh_error::LatticeError;
use crate::topology::unit_cell::UnitCell;
use crate::topology::volume::Volume;
use serde::{Deserialize, Serialize};

/// Independent multipliers along x, y and z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScaleFactors {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same factor on every axis.
    pub const fn uniform(s: f64) -> Self {
        Self::new(s, s, s)
    }

    /// Reject zero and non-finite factors.
    pub fn validate(&self) -> Result<(), LatticeError> {
        for f in [self.x, self.y, self.z] {
            if !f.is_finite() || f == 0.0 {
                return Err(LatticeError::InvalidScaleFactor(f));
            }
        }
        Ok(())
    }

    #[inline]
    fn apply(&self, p: &Point3) -> Point3 {
        [self.x * p[0], self.y * p[1], self.z * p[2]]
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl UnitCell {
    /// Scale node coordinates and periodicity vectors.
    pub fn scaled(&self, factors: ScaleFactors) -> Result<UnitCell, LatticeError> {
        factors.validate()?;
        log::info!(
            "scaling unit cell by x: {}, y: {}, z: {}",
            factors.x,
            factors.y,
            factors.z
        );
        Ok(self.map_geometry(|p| factors.apply(p), |v| factors.apply(v)))
    }
}

impl Volume {
    /// Scale node coordinates.
    pub fn scaled(&self, factors: ScaleFactors) -> Result<Volume, LatticeError> {
        factors.validate()?;
        log::info!(
            "scaling volume by x: {}, y: {}, z: {}",
            factors.x,
            factors.y,
            factors.z
        );
        Ok(self.map_coordinates(|p| factors.apply(p)))
    }
}
