//! # arcscan
//!
//! Angular multi-cast sensing: spread a fixed number of ray or swept-sphere
//! probes evenly across an arc around a center direction, collect the hits in
//! left-to-right order, and turn the mixed hit/miss results into a dense array
//! of positions.
//!
//! The crate owns no geometry. Probes are answered by a [`SpatialQuery`]
//! provider you implement on top of your physics scene, BVH or map.
//!
//! ## Quick Start
//!
//! ```
//! use arcscan::math::Vec3;
//! use arcscan::scene::StaticScene;
//! use arcscan::{ArcScanDesc, ArcScanner, ScanRequest};
//!
//! // A wall five meters ahead
//! let mut scene = StaticScene::new();
//! scene.add_plane(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//!
//! // Fan rotates about -Y: negative offsets to the left, positive to the right
//! let scanner = ArcScanner::new(ArcScanDesc::default())?;
//!
//! let request = ScanRequest::new(Vec3::ZERO, Vec3::NEG_Z)
//!     .with_samples(7)
//!     .with_angle(120.0)
//!     .with_max_distance(8.0);
//!
//! let result = scanner.scan(&request, &scene);
//! println!("{} of {} samples hit", result.hit_count(), result.len());
//!
//! // One position per sample, misses replaced by their extent points
//! let positions = scanner.positions(&request, result.as_slice());
//! assert_eq!(positions.len(), 7);
//! # Ok::<(), arcscan::ArcScanError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`ArcSampler`]**: Angular offsets and rotated directions for a sample count and arc
//! - **[`ArcScanner`]**: Issues one [`Probe`] per sample and fills a [`ScanResult`]
//! - **[`extract_points`]**: Dense positions from a finished scan, without re-querying
//! - **[`SpatialQuery`]**: Trait for whatever answers probes
//! - **[`StaticScene`](scene::StaticScene)**: Analytic spheres-and-planes provider
//!
//! ## Sampling rules
//!
//! - `0` samples: nothing is queried
//! - `1` sample: a single probe straight along the center direction, whatever the angle
//! - partial arcs: first and last samples on the arc edges
//! - full circles: evenly spaced with no bearing sampled twice
//!
//! ## Provider errors
//!
//! [`ArcScanner::scan`] works with infallible providers and cannot fail.
//! Providers that can fail implement [`TrySpatialQuery`] and go through
//! [`ArcScanner::try_scan`], where the first error aborts the scan. Wrap them in
//! [`MissOnError`](scene::MissOnError) to record failures as misses instead.

mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod math;
pub mod probe;
pub mod sampler;
pub mod scanner;
pub mod scene;

pub use config::ArcScanDesc;
pub use error::ArcScanError;
pub use extract::{extent_point, extract_points};
pub use probe::{Probe, ProbeShape, QueryFilter, TriggerPolicy};
pub use sampler::{ArcSampler, clamp_arc_degrees, sample_directions};
pub use scanner::{ArcScanner, ScanRequest, ScanResult};
pub use scene::{HitResult, SpatialQuery, TrySpatialQuery};
