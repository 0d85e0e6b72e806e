//! Spatial query traits implemented by whatever owns the world geometry.

use crate::math::Vec3;
use crate::probe::Probe;
use std::convert::Infallible;

/// World-space record of a probe hit.
///
/// The scanner only ever reads `point`. The remaining fields are filled in by
/// the provider for callers that want them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Contact point on the hit surface
    pub point: Vec3,

    /// Surface normal at the contact point, facing back towards the probe
    pub normal: Vec3,

    /// Distance travelled along the normalized probe direction
    pub distance: f32,
}

impl HitResult {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
        }
    }

    /// A hit that only knows where it happened.
    pub fn at(point: Vec3) -> Self {
        Self {
            point,
            normal: Vec3::ZERO,
            distance: 0.0,
        }
    }
}

/// Answers probes against some world.
///
/// Implement this on your physics scene, BVH, voxel map or anything else that
/// can answer "what does this ray or swept sphere hit first". Returning `None`
/// means a miss.
///
/// The engine calls `cast` once per sample, in sample order, and never retries.
/// Implementations should be deterministic for a fixed world and free of side
/// effects; scans rely on that for stable results.
///
/// # Thread Safety
///
/// No `Send + Sync` bound is imposed here. Scanning from several threads at
/// once (see [`ArcScanner::scan_batch`](crate::ArcScanner::scan_batch))
/// requires the provider to be `Sync`, which only makes sense if concurrent
/// read-only queries are safe for your world.
///
/// # Example
///
/// ```
/// use arcscan::math::Vec3;
/// use arcscan::scene::{HitResult, SpatialQuery};
/// use arcscan::Probe;
///
/// struct Floor;
///
/// impl SpatialQuery for Floor {
///     fn cast(&self, probe: &Probe) -> Option<HitResult> {
///         let dir = probe.direction_normalized();
///         if dir.y >= 0.0 || probe.origin.y <= 0.0 {
///             return None;
///         }
///         let t = probe.origin.y / -dir.y;
///         (t <= probe.max_distance).then(|| HitResult::new(probe.origin + dir * t, Vec3::Y, t))
///     }
/// }
///
/// let hit = Floor.cast(&Probe::ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 10.0));
/// assert_eq!(hit.map(|h| h.distance), Some(2.0));
/// ```
pub trait SpatialQuery {
    /// Returns the first hit along the probe, or `None` on a miss.
    fn cast(&self, probe: &Probe) -> Option<HitResult>;
}

impl<F> SpatialQuery for F
where
    F: Fn(&Probe) -> Option<HitResult>,
{
    fn cast(&self, probe: &Probe) -> Option<HitResult> {
        self(probe)
    }
}

/// A provider that can fail to answer.
///
/// Used with [`ArcScanner::try_scan`](crate::ArcScanner::try_scan): an error
/// aborts the scan and is reported with the index of the failing sample. Wrap
/// the provider in [`MissOnError`] to record failures as misses instead.
///
/// Every [`SpatialQuery`] is a `TrySpatialQuery` that never fails.
pub trait TrySpatialQuery {
    type Error: std::error::Error + Send + Sync + 'static;

    fn try_cast(&self, probe: &Probe) -> Result<Option<HitResult>, Self::Error>;
}

impl<T> TrySpatialQuery for T
where
    T: SpatialQuery + ?Sized,
{
    type Error = Infallible;

    fn try_cast(&self, probe: &Probe) -> Result<Option<HitResult>, Self::Error> {
        Ok(self.cast(probe))
    }
}

/// Turns provider errors into misses.
///
/// Each swallowed error is logged at `warn` level.
#[derive(Debug, Clone, Copy)]
pub struct MissOnError<P>(pub P);

impl<P> MissOnError<P> {
    pub fn new(provider: P) -> Self {
        Self(provider)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: TrySpatialQuery> SpatialQuery for MissOnError<P> {
    fn cast(&self, probe: &Probe) -> Option<HitResult> {
        match self.0.try_cast(probe) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!(
                    "Spatial query from {:?} along {:?} failed, recording a miss: {}",
                    probe.origin,
                    probe.direction,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, thiserror::Error)]
    #[error("backend offline")]
    struct Offline;

    struct OfflineProvider {
        calls: Cell<usize>,
    }

    impl TrySpatialQuery for OfflineProvider {
        type Error = Offline;

        fn try_cast(&self, _probe: &Probe) -> Result<Option<HitResult>, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Err(Offline)
        }
    }

    #[test]
    fn test_hit_result_at() {
        let hit = HitResult::at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(hit.point, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_closure_provider() {
        let provider = |probe: &Probe| Some(HitResult::at(probe.origin + probe.direction));
        let hit = provider.cast(&Probe::ray(Vec3::ZERO, Vec3::X, 5.0));
        assert_eq!(hit.map(|h| h.point), Some(Vec3::X));
    }

    #[test]
    fn test_infallible_try_cast() {
        let provider = |_: &Probe| -> Option<HitResult> { None };
        assert!(matches!(
            provider.try_cast(&Probe::ray(Vec3::ZERO, Vec3::X, 1.0)),
            Ok(None)
        ));
    }

    #[test]
    fn test_miss_on_error() {
        let _ = env_logger::builder().is_test(true).try_init();

        let provider = MissOnError::new(OfflineProvider {
            calls: Cell::new(0),
        });
        let probe = Probe::ray(Vec3::ZERO, Vec3::X, 1.0);
        assert_eq!(provider.cast(&probe), None);
        assert_eq!(provider.cast(&probe), None);
        assert_eq!(provider.into_inner().calls.get(), 2);
    }
}
