//! Single directional spatial queries.
//!
//! A [`Probe`] is the fully specified input for one cast: where it starts,
//! which way it goes, what it sweeps, how far, and which colliders it may
//! report. The scanner builds one per angular sample and hands it to a
//! [`SpatialQuery`](crate::scene::SpatialQuery).

use crate::math::Vec3;

/// Geometry swept along the probe direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProbeShape {
    /// Infinitely thin ray.
    #[default]
    Ray,
    /// Sphere of the given radius swept along the direction.
    Sphere { radius: f32 },
}

/// Whether a probe may report hits against trigger volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerPolicy {
    Ignore,
    Collide,
    /// Let the provider apply its own global default.
    #[default]
    UseGlobalDefault,
}

/// Opaque collision filter passed through to the provider.
///
/// The engine never looks at the bits; what they mean is up to the
/// [`SpatialQuery`](crate::scene::SpatialQuery) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryFilter(pub i32);

impl QueryFilter {
    /// Every bit set.
    pub const ALL: Self = Self(-1);
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// One directional spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Start of the cast in world space
    pub origin: Vec3,
    /// Cast direction, not necessarily normalized
    pub direction: Vec3,
    pub shape: ProbeShape,
    /// Furthest distance to report a hit at. May be `f32::INFINITY`.
    pub max_distance: f32,
    pub filter: QueryFilter,
    pub trigger_policy: TriggerPolicy,
}

impl Probe {
    /// Creates a ray probe with the default filter and trigger policy.
    pub fn ray(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            shape: ProbeShape::Ray,
            max_distance,
            filter: QueryFilter::default(),
            trigger_policy: TriggerPolicy::default(),
        }
    }

    /// Creates a swept-sphere probe with the default filter and trigger policy.
    pub fn sphere(origin: Vec3, direction: Vec3, radius: f32, max_distance: f32) -> Self {
        Self {
            shape: ProbeShape::Sphere { radius },
            ..Self::ray(origin, direction, max_distance)
        }
    }

    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_trigger_policy(mut self, policy: TriggerPolicy) -> Self {
        self.trigger_policy = policy;
        self
    }

    /// Direction scaled to unit length, or zero if the direction is zero.
    pub fn direction_normalized(&self) -> Vec3 {
        self.direction.normalize_or_zero()
    }

    /// Radius of the swept shape, zero for rays.
    pub fn radius(&self) -> f32 {
        match self.shape {
            ProbeShape::Ray => 0.0,
            ProbeShape::Sphere { radius } => radius,
        }
    }
}
