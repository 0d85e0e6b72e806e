//! Angular sampling of an arc.
//!
//! Given a sample count and an arc angle, [`ArcSampler`] produces the angular
//! offset of every sample relative to the center direction, and the rotated
//! directions themselves. Both the scanner and the point extractor go through
//! this type, so a scan and the positions derived from it always agree on
//! which direction sample `i` looked in.
//!
//! # Spacing
//!
//! Offsets start at `-angle / 2` and increase by a fixed step:
//!
//! - partial arcs (`angle < 360`) use `angle / (n - 1)`, so the first and last
//!   samples sit exactly on the two edges of the arc;
//! - full circles use `angle / n`, so the last sample stops one step short of
//!   the first and no bearing is sampled twice.
//!
//! Angles are clamped to `[MIN_ARC_DEGREES, 360]` before use. A single sample
//! always looks straight along the center direction.

use crate::math::{Vec3, rotate_about};

/// Smallest positive `f32`, the lower bound for arc angles.
pub const MIN_ARC_DEGREES: f32 = f32::from_bits(1);

pub const FULL_CIRCLE_DEGREES: f32 = 360.0;

/// Clamps an arc angle to `[MIN_ARC_DEGREES, 360]`.
///
/// Zero and negative angles become the smallest positive angle rather than an
/// error. NaN is passed through untouched.
pub fn clamp_arc_degrees(angle_degrees: f32) -> f32 {
    angle_degrees.clamp(MIN_ARC_DEGREES, FULL_CIRCLE_DEGREES)
}

/// Offsets and directions for `sample_count` samples across an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSampler {
    sample_count: usize,
    angle_degrees: f32,
    start_degrees: f32,
    step_degrees: f32,
}

impl ArcSampler {
    pub fn new(sample_count: usize, angle_degrees: f32) -> Self {
        if sample_count < 2 {
            return Self {
                sample_count,
                angle_degrees: 0.0,
                start_degrees: 0.0,
                step_degrees: 0.0,
            };
        }

        let angle = clamp_arc_degrees(angle_degrees);
        let step = if angle >= FULL_CIRCLE_DEGREES {
            angle / sample_count as f32
        } else {
            angle / (sample_count - 1) as f32
        };

        Self {
            sample_count,
            angle_degrees: angle,
            start_degrees: -angle / 2.0,
            step_degrees: step,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Arc angle after clamping. Zero when fewer than two samples are taken.
    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn start_degrees(&self) -> f32 {
        self.start_degrees
    }

    pub fn step_degrees(&self) -> f32 {
        self.step_degrees
    }

    /// Offset of sample `index` from the center direction, in degrees.
    pub fn offset(&self, index: usize) -> f32 {
        self.start_degrees + self.step_degrees * index as f32
    }

    /// All offsets, leftmost first.
    pub fn offsets(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        (0..self.sample_count).map(|i| self.offset(i))
    }

    /// Direction of sample `index`: `center` rotated by its offset about `axis`.
    ///
    /// `axis` must be unit length. With a single sample, `center` is returned
    /// as is.
    pub fn direction(&self, index: usize, center: Vec3, axis: Vec3) -> Vec3 {
        if self.sample_count == 1 {
            return center;
        }
        rotate_about(center, axis, self.offset(index))
    }

    /// All sample directions, leftmost first.
    pub fn directions(
        &self,
        center: Vec3,
        axis: Vec3,
    ) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        (0..self.sample_count).map(move |i| self.direction(i, center, axis))
    }
}

/// Collects the sample directions for one arc.
pub fn sample_directions(
    sample_count: usize,
    center: Vec3,
    angle_degrees: f32,
    axis: Vec3,
) -> Vec<Vec3> {
    ArcSampler::new(sample_count, angle_degrees)
        .directions(center, axis)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn offsets(count: usize, angle: f32) -> Vec<f32> {
        ArcSampler::new(count, angle).offsets().collect()
    }

    #[test]
    fn test_zero_samples() {
        assert!(offsets(0, 90.0).is_empty());
        assert!(sample_directions(0, Vec3::NEG_Z, 90.0, Vec3::NEG_Y).is_empty());
    }

    #[test]
    fn test_single_sample_ignores_angle() {
        let center = Vec3::new(0.3, 0.0, -2.0);
        for angle in [0.0, 37.0, 720.0, -15.0] {
            let dirs = sample_directions(1, center, angle, Vec3::NEG_Y);
            assert_eq!(dirs, vec![center]);
            assert_eq!(offsets(1, angle), vec![0.0]);
        }
    }

    #[test]
    fn test_partial_arc_offsets() {
        assert_eq!(offsets(3, 90.0), vec![-45.0, 0.0, 45.0]);
        assert_eq!(offsets(2, 120.0), vec![-60.0, 60.0]);
    }

    #[test]
    fn test_full_circle_offsets() {
        let sampler = ArcSampler::new(4, 360.0);
        assert_eq!(sampler.step_degrees(), 90.0);
        assert_eq!(sampler.offsets().collect::<Vec<_>>(), vec![-180.0, -90.0, 0.0, 90.0]);
    }

    #[test]
    fn test_angle_above_full_circle_is_clamped() {
        assert_eq!(offsets(4, 720.0), offsets(4, 360.0));
        assert_eq!(ArcSampler::new(4, 720.0).angle_degrees(), 360.0);
    }

    #[test]
    fn test_zero_angle_is_clamped_to_minimum() {
        let sampler = ArcSampler::new(5, 0.0);
        assert_eq!(sampler.angle_degrees(), MIN_ARC_DEGREES);
        let offsets: Vec<f32> = sampler.offsets().collect();
        assert_eq!(offsets.len(), 5);
        for offset in offsets {
            assert!(offset.is_finite());
            assert!(offset.abs() <= MIN_ARC_DEGREES);
        }

        let dirs = sample_directions(5, Vec3::NEG_Z, 0.0, Vec3::NEG_Y);
        for dir in dirs {
            assert!(dir.abs_diff_eq(Vec3::NEG_Z, EPS));
        }
    }

    #[test]
    fn test_negative_angle_is_clamped_to_minimum() {
        assert_eq!(ArcSampler::new(3, -90.0).angle_degrees(), MIN_ARC_DEGREES);
    }

    #[test]
    fn test_offsets_increase_left_to_right() {
        for (count, angle) in [(7, 100.0), (12, 360.0), (2, 1.0)] {
            let offsets = offsets(count, angle);
            assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_partial_arc_hits_both_edges() {
        let offsets = offsets(9, 170.0);
        assert!((offsets[0] + 85.0).abs() < EPS);
        assert!((offsets[8] - 85.0).abs() < EPS);
    }

    #[test]
    fn test_full_circle_has_no_duplicate_bearing() {
        let dirs = sample_directions(8, Vec3::NEG_Z, 360.0, Vec3::NEG_Y);
        for (i, a) in dirs.iter().enumerate() {
            for b in &dirs[i + 1..] {
                assert!(!a.abs_diff_eq(*b, 1e-3));
            }
        }
    }

    #[test]
    fn test_directions_sweep_left_to_right() {
        let dirs = sample_directions(3, Vec3::NEG_Z, 90.0, Vec3::NEG_Y);
        let diag = std::f32::consts::FRAC_1_SQRT_2;
        assert!(dirs[0].abs_diff_eq(Vec3::new(-diag, 0.0, -diag), EPS));
        assert!(dirs[1].abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(dirs[2].abs_diff_eq(Vec3::new(diag, 0.0, -diag), EPS));
    }

    #[test]
    fn test_directions_keep_center_length() {
        let center = Vec3::new(0.0, 0.0, -3.0);
        for dir in sample_directions(6, center, 250.0, Vec3::NEG_Y) {
            assert!((dir.length() - 3.0).abs() < 1e-4);
            assert!(dir.y.abs() < EPS);
        }
    }

    #[test]
    fn test_nan_angle_does_not_panic() {
        let sampler = ArcSampler::new(3, f32::NAN);
        assert_eq!(sampler.offsets().count(), 3);
    }
}
