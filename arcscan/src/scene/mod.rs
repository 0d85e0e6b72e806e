//! World-side collaborators of the scanner.
//!
//! The scanner never owns geometry. It hands each [`Probe`](crate::Probe) to a
//! [`SpatialQuery`] and records whatever comes back.
//!
//! # Overview
//!
//! 1. **SpatialQuery** - Infallible provider: a probe in, an optional hit out
//! 2. **TrySpatialQuery** - Provider that can fail; errors abort a `try_scan`
//! 3. **MissOnError** - Adapter that records provider failures as misses
//! 4. **StaticScene** - Analytic spheres-and-planes provider for tests and demos
//!
//! # Example
//!
//! ```
//! use arcscan::math::Vec3;
//! use arcscan::scene::{SpatialQuery, StaticScene};
//! use arcscan::Probe;
//!
//! let mut scene = StaticScene::new();
//! scene.add_plane(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
//!
//! let hit = scene.cast(&Probe::ray(Vec3::ZERO, Vec3::NEG_Z, 50.0));
//! assert!(hit.is_some());
//! ```

pub mod query;
pub mod static_scene;

pub use query::{HitResult, MissOnError, SpatialQuery, TrySpatialQuery};
pub use static_scene::{Obstacle, ObstacleShape, StaticScene};
