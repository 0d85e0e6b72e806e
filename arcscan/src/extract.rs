//! Dense positions from a finished scan.
//!
//! Downstream consumers (navigation, debug lines, occupancy updates) usually
//! want one position per sample whether or not the sample hit. Misses are
//! replaced by the extent point: where the probe would have ended up after
//! travelling its full range. No probes are issued here; directions are
//! recomputed with the same [`ArcSampler`] the scanner used.

use crate::math::Vec3;
use crate::sampler::ArcSampler;
use crate::scanner::ScanRequest;
use crate::scene::HitResult;

/// `origin + normalize(direction) * max_distance`.
///
/// Components the direction does not move along stay at `origin`, also for an
/// infinite `max_distance`. A zero direction yields `origin`.
pub fn extent_point(origin: Vec3, direction: Vec3, max_distance: f32) -> Vec3 {
    let unit = direction.normalize_or_zero();
    origin + Vec3::select(unit.cmpeq(Vec3::ZERO), Vec3::ZERO, unit * max_distance)
}

/// Writes one position per sample into `dest` and returns how many were written.
///
/// `hits` is the slot buffer of a scan made with `request` and rotation
/// `axis`; its length is taken as the sample count, so `request.sample_count`
/// is not consulted. Only `min(hits.len(), dest.len())` entries are written,
/// the rest of `dest` is left alone.
pub fn extract_points(
    axis: Vec3,
    request: &ScanRequest,
    hits: &[Option<HitResult>],
    dest: &mut [Vec3],
) -> usize {
    let n = hits.len().min(dest.len());
    if n < 1 {
        return 0;
    }

    let sampler = ArcSampler::new(hits.len(), request.angle_degrees);
    for (index, (slot, hit)) in dest.iter_mut().zip(hits).enumerate() {
        *slot = match hit {
            Some(hit) => hit.point,
            None => extent_point(
                request.origin,
                sampler.direction(index, request.center_direction, axis),
                request.max_distance,
            ),
        };
    }

    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Probe;
    use crate::scanner::ArcScanner;
    use crate::scene::StaticScene;

    const EPS: f32 = 1e-4;

    fn request(samples: usize, angle: f32, max_distance: f32) -> ScanRequest {
        ScanRequest::new(Vec3::new(1.0, 0.5, 2.0), Vec3::new(0.0, 0.0, -4.0))
            .with_samples(samples)
            .with_angle(angle)
            .with_max_distance(max_distance)
    }

    #[test]
    fn test_extent_point() {
        let p = extent_point(Vec3::ONE, Vec3::new(0.0, 0.0, -10.0), 3.0);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 1.0, -2.0), EPS));
        assert_eq!(extent_point(Vec3::ONE, Vec3::ZERO, 3.0), Vec3::ONE);
    }

    #[test]
    fn test_extent_point_infinite_range() {
        let p = extent_point(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Z, f32::INFINITY);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
        assert_eq!(p.z, f32::NEG_INFINITY);
        assert_eq!(extent_point(Vec3::ONE, Vec3::ZERO, f32::INFINITY), Vec3::ONE);
    }

    #[test]
    fn test_default_request_miss_has_no_nan() {
        let scanner = ArcScanner::default();

        let single = ScanRequest::new(Vec3::ZERO, Vec3::NEG_Z).with_samples(1);
        let positions = scanner.positions(&single, &[None]);
        assert_eq!(positions[0].x, 0.0);
        assert_eq!(positions[0].y, 0.0);
        assert_eq!(positions[0].z, f32::NEG_INFINITY);

        let fan = ScanRequest::new(Vec3::ZERO, Vec3::NEG_Z)
            .with_samples(5)
            .with_angle(90.0);
        for position in scanner.positions(&fan, &[None; 5]) {
            assert!(!position.is_nan());
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn test_empty_inputs_write_nothing() {
        let scanner = ArcScanner::default();
        let req = request(3, 90.0, 5.0);

        let mut dest = [Vec3::splat(7.0); 2];
        assert_eq!(scanner.extract_points(&req, &[], &mut dest), 0);
        assert_eq!(dest, [Vec3::splat(7.0); 2]);

        let hits = [None, None, None];
        assert_eq!(scanner.extract_points(&req, &hits, &mut []), 0);
    }

    #[test]
    fn test_all_hits_round_trip() {
        let scanner = ArcScanner::default();
        let hits: Vec<Option<HitResult>> = (0..6)
            .map(|i| Some(HitResult::at(Vec3::new(i as f32, -3.0, 0.25))))
            .collect();

        for (angle, distance) in [(0.0, 1.0), (90.0, 50.0), (360.0, f32::INFINITY)] {
            let positions = scanner.positions(&request(6, angle, distance), &hits);
            let expected: Vec<Vec3> = hits.iter().map(|h| h.unwrap().point).collect();
            assert_eq!(positions, expected);
        }
    }

    #[test]
    fn test_single_sample_miss_uses_center() {
        let scanner = ArcScanner::default();
        let req = request(1, 123.0, 5.0);
        let positions = scanner.positions(&req, &[None]);
        assert!(positions[0].abs_diff_eq(Vec3::new(1.0, 0.5, -3.0), EPS));
    }

    #[test]
    fn test_miss_synthesis_matches_scan_directions() {
        let scanner = ArcScanner::default();
        let req = request(5, 120.0, 8.0);
        let never = |_: &Probe| -> Option<HitResult> { None };
        let result = scanner.scan(&req, &never);

        let positions = scanner.positions(&req, result.as_slice());
        for (position, direction) in positions.iter().zip(scanner.directions(&req)) {
            let expected = req.origin + direction.normalize() * 8.0;
            assert!(position.abs_diff_eq(expected, EPS));
            assert!((position.distance(req.origin) - 8.0).abs() < EPS);
        }
    }

    #[test]
    fn test_mixed_hits_and_misses() {
        let mut scene = StaticScene::new();
        // Only the leftmost sample of a 180 degree fan can reach this sphere.
        scene.add_sphere(Vec3::new(-4.0, 0.5, 2.0), 1.0);

        let scanner = ArcScanner::default();
        let req = request(3, 180.0, 10.0);
        let result = scanner.scan(&req, &scene);
        assert_eq!(result.hit_count(), 1);

        let positions = scanner.positions(&req, result.as_slice());
        assert!(positions[0].abs_diff_eq(Vec3::new(-3.0, 0.5, 2.0), EPS));
        assert!(positions[1].abs_diff_eq(Vec3::new(1.0, 0.5, -8.0), EPS));
        assert!(positions[2].abs_diff_eq(Vec3::new(11.0, 0.5, 2.0), EPS));
    }

    #[test]
    fn test_partial_destination() {
        let scanner = ArcScanner::default();
        let req = request(4, 360.0, 2.0);
        let hits = [None, Some(HitResult::at(Vec3::X)), None, None];

        let mut dest = [Vec3::splat(-1.0); 2];
        assert_eq!(scanner.extract_points(&req, &hits, &mut dest), 2);
        assert_eq!(dest[1], Vec3::X);

        // Direction 0 still comes from the 4-sample fan, not a 2-sample one.
        let expected = extent_point(req.origin, scanner.directions(&req)[0], 2.0);
        assert!(dest[0].abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_longer_destination_keeps_tail() {
        let scanner = ArcScanner::default();
        let req = request(2, 90.0, 1.0);
        let hits = [Some(HitResult::at(Vec3::Y)), Some(HitResult::at(Vec3::Z))];

        let mut dest = [Vec3::splat(9.0); 4];
        assert_eq!(scanner.extract_points(&req, &hits, &mut dest), 2);
        assert_eq!(dest, [Vec3::Y, Vec3::Z, Vec3::splat(9.0), Vec3::splat(9.0)]);
    }
}
