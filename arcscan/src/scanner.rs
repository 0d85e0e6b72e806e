//! Arc scans: requests, results and the scanner.

use crate::config::ArcScanDesc;
use crate::error::{ArcScanError, Result};
use crate::extract;
use crate::math::{Pose, Vec3};
use crate::probe::{Probe, ProbeShape, QueryFilter, TriggerPolicy};
use crate::sampler::ArcSampler;
use crate::scene::{HitResult, SpatialQuery, TrySpatialQuery};
use std::convert::Infallible;

/// Parameters of one arc scan.
///
/// Built per call and not retained by the scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRequest {
    /// Where every probe starts
    pub origin: Vec3,
    /// Middle of the arc. Need not be normalized.
    pub center_direction: Vec3,
    /// Number of probes to spread across the arc
    pub sample_count: usize,
    /// Arc width in degrees, clamped to `(0, 360]` when two or more samples are taken
    pub angle_degrees: f32,
    pub max_distance: f32,
    pub shape: ProbeShape,
    pub filter: QueryFilter,
    pub trigger_policy: TriggerPolicy,
}

impl ScanRequest {
    /// A single infinite ray along `center_direction`; use the `with_*`
    /// methods to widen it into an arc.
    pub fn new(origin: Vec3, center_direction: Vec3) -> Self {
        Self {
            origin,
            center_direction,
            sample_count: 1,
            angle_degrees: 0.0,
            max_distance: f32::INFINITY,
            shape: ProbeShape::Ray,
            filter: QueryFilter::default(),
            trigger_policy: TriggerPolicy::default(),
        }
    }

    /// Scans from the pose's position around its forward axis.
    pub fn from_pose(pose: &Pose) -> Self {
        Self::new(pose.position, pose.forward())
    }

    pub fn with_samples(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_angle(mut self, angle_degrees: f32) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_shape(mut self, shape: ProbeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_sphere_radius(self, radius: f32) -> Self {
        self.with_shape(ProbeShape::Sphere { radius })
    }

    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_trigger_policy(mut self, policy: TriggerPolicy) -> Self {
        self.trigger_policy = policy;
        self
    }

    /// Probe for one sampled direction, carrying the request's shape, range,
    /// filter and trigger policy.
    pub fn probe(&self, direction: Vec3) -> Probe {
        Probe {
            origin: self.origin,
            direction,
            shape: self.shape,
            max_distance: self.max_distance,
            filter: self.filter,
            trigger_policy: self.trigger_policy,
        }
    }
}

/// Hits of one scan, one slot per angular sample, leftmost first.
///
/// A `None` slot is a miss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    hits: Vec<Option<HitResult>>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty result with room for `capacity` samples, for reuse with
    /// [`ArcScanner::scan_into`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of samples that hit something.
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|hit| hit.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<&HitResult> {
        self.hits.get(index).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<HitResult>> {
        self.hits.iter()
    }

    pub fn as_slice(&self) -> &[Option<HitResult>] {
        &self.hits
    }

    /// Present hits with their sample index.
    pub fn hits(&self) -> impl Iterator<Item = (usize, &HitResult)> {
        self.hits
            .iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.as_ref().map(|hit| (i, hit)))
    }

    /// Closest hit by reported distance, with its sample index.
    pub fn nearest(&self) -> Option<(usize, &HitResult)> {
        self.hits()
            .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
    }

    pub fn into_inner(self) -> Vec<Option<HitResult>> {
        self.hits
    }
}

impl From<Vec<Option<HitResult>>> for ScanResult {
    fn from(hits: Vec<Option<HitResult>>) -> Self {
        Self { hits }
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a Option<HitResult>;
    type IntoIter = std::slice::Iter<'a, Option<HitResult>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

/// Fans probes across an arc and collects the hits in sample order.
///
/// `ArcScanner` only holds immutable configuration (the unit rotation axis),
/// so one instance can be shared freely between agents and threads. All
/// per-call state lives in the [`ScanRequest`] and the caller's buffers.
///
/// # Example
///
/// ```
/// use arcscan::math::Vec3;
/// use arcscan::scene::StaticScene;
/// use arcscan::{ArcScanner, ScanRequest};
///
/// let mut scene = StaticScene::new();
/// scene.add_plane(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
///
/// let scanner = ArcScanner::default();
/// let request = ScanRequest::new(Vec3::ZERO, Vec3::NEG_Z)
///     .with_samples(5)
///     .with_angle(90.0)
///     .with_max_distance(20.0);
///
/// let result = scanner.scan(&request, &scene);
/// assert_eq!(result.len(), 5);
/// assert_eq!(result.hit_count(), 5);
///
/// let positions = scanner.positions(&request, result.as_slice());
/// assert_eq!(positions.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcScanner {
    axis: Vec3,
}

impl Default for ArcScanner {
    fn default() -> Self {
        Self {
            axis: ArcScanDesc::default().rotation_axis,
        }
    }
}

impl ArcScanner {
    pub fn new(desc: ArcScanDesc) -> Result<Self> {
        let axis = desc.validate()?;
        Ok(Self { axis })
    }

    /// Unit axis the fan rotates about.
    pub fn rotation_axis(&self) -> Vec3 {
        self.axis
    }

    /// Sampled directions for `request`, in the order probes are issued.
    pub fn directions(&self, request: &ScanRequest) -> Vec<Vec3> {
        ArcSampler::new(request.sample_count, request.angle_degrees)
            .directions(request.center_direction, self.axis)
            .collect()
    }

    /// Runs a scan into a freshly allocated result of `request.sample_count` slots.
    pub fn scan<P>(&self, request: &ScanRequest, provider: &P) -> ScanResult
    where
        P: SpatialQuery + ?Sized,
    {
        let mut result = ScanResult::with_capacity(request.sample_count);
        self.scan_into(request, provider, &mut result);
        result
    }

    /// Runs a scan into a caller-owned result and returns the hit count.
    ///
    /// With `sample_count == 0` nothing is queried and `result` is left as it
    /// was. Otherwise `result` is resized to `sample_count` and every slot is
    /// overwritten, so reused buffers never keep hits from a previous scan.
    pub fn scan_into<P>(
        &self,
        request: &ScanRequest,
        provider: &P,
        result: &mut ScanResult,
    ) -> usize
    where
        P: SpatialQuery + ?Sized,
    {
        self.run(request, &mut result.hits, |probe| {
            Ok::<_, Infallible>(provider.cast(probe))
        })
        .unwrap_or_else(|(_, never)| match never {})
    }

    /// Like [`scan`](Self::scan) for a provider that can fail.
    ///
    /// The first provider error aborts the scan; no further probes are issued.
    pub fn try_scan<P>(&self, request: &ScanRequest, provider: &P) -> Result<ScanResult>
    where
        P: TrySpatialQuery + ?Sized,
    {
        let mut result = ScanResult::with_capacity(request.sample_count);
        self.try_scan_into(request, provider, &mut result)?;
        Ok(result)
    }

    /// Like [`scan_into`](Self::scan_into) for a provider that can fail.
    ///
    /// On error, slots before the failing sample hold their fresh results and
    /// every slot from the failing sample on is reset to `None`.
    pub fn try_scan_into<P>(
        &self,
        request: &ScanRequest,
        provider: &P,
        result: &mut ScanResult,
    ) -> Result<usize>
    where
        P: TrySpatialQuery + ?Sized,
    {
        self.run(request, &mut result.hits, |probe| provider.try_cast(probe))
            .map_err(|(index, e)| ArcScanError::Provider {
                index,
                source: Box::new(e),
            })
    }

    /// Writes the dense positions for `hits` into `dest`; see
    /// [`extract::extract_points`]. Returns the number of entries written.
    pub fn extract_points(
        &self,
        request: &ScanRequest,
        hits: &[Option<HitResult>],
        dest: &mut [Vec3],
    ) -> usize {
        extract::extract_points(self.axis, request, hits, dest)
    }

    /// One position per slot of `hits`, extent points standing in for misses.
    pub fn positions(&self, request: &ScanRequest, hits: &[Option<HitResult>]) -> Vec<Vec3> {
        let mut positions = vec![Vec3::ZERO; hits.len()];
        self.extract_points(request, hits, &mut positions);
        positions
    }

    fn run<F, E>(
        &self,
        request: &ScanRequest,
        hits: &mut Vec<Option<HitResult>>,
        mut cast: F,
    ) -> std::result::Result<usize, (usize, E)>
    where
        F: FnMut(&Probe) -> std::result::Result<Option<HitResult>, E>,
    {
        let sample_count = request.sample_count;
        if sample_count < 1 {
            return Ok(0);
        }

        hits.clear();
        hits.resize(sample_count, None);

        let sampler = ArcSampler::new(sample_count, request.angle_degrees);
        let mut hit_count = 0;

        for (index, direction) in sampler
            .directions(request.center_direction, self.axis)
            .enumerate()
        {
            let probe = request.probe(direction);
            let hit = cast(&probe).map_err(|e| (index, e))?;

            log::trace!(
                "Sample {}/{} along {:?}: {}",
                index + 1,
                sample_count,
                direction,
                if hit.is_some() { "hit" } else { "miss" }
            );

            if hit.is_some() {
                hit_count += 1;
            }
            hits[index] = hit;
        }

        log::debug!(
            "Arc scan from {:?}: {} samples over {} degrees, {} hits",
            request.origin,
            sample_count,
            sampler.angle_degrees(),
            hit_count
        );

        Ok(hit_count)
    }
}
