//! Configuration for arcscan

use crate::error::{ArcScanError, Result};
use crate::math::Vec3;

/// Configuration descriptor for an [`ArcScanner`](crate::ArcScanner).
///
/// This holds what stays fixed across scans. Everything that changes per
/// call lives on [`ScanRequest`](crate::ScanRequest).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcScanDesc {
    /// Axis the sampling fan rotates about. Samples stay in the plane
    /// perpendicular to it. Need not be unit length, must be non-zero.
    ///
    /// The default, -Y, turns positive offsets clockwise when seen from +Y,
    /// so in a right-handed Y-up frame the fan sweeps from left to right.
    pub rotation_axis: Vec3,
}

impl Default for ArcScanDesc {
    fn default() -> Self {
        Self {
            rotation_axis: Vec3::NEG_Y,
        }
    }
}

impl ArcScanDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation_axis(mut self, axis: Vec3) -> Self {
        self.rotation_axis = axis;
        self
    }

    /// Checks the descriptor and returns the unit rotation axis.
    pub fn validate(&self) -> Result<Vec3> {
        if !self.rotation_axis.is_finite() {
            return Err(ArcScanError::Configuration(format!(
                "rotation axis {:?} is not finite",
                self.rotation_axis
            )));
        }

        self.rotation_axis.try_normalize().ok_or_else(|| {
            ArcScanError::Configuration(format!(
                "rotation axis {:?} has zero length",
                self.rotation_axis
            ))
        })
    }
}
