//! Analytic reference provider.
//!
//! [`StaticScene`] answers ray and swept-sphere probes against a flat list of
//! spheres and planes. It has no broad phase and no dynamics; it exists so the
//! scanner can be driven against real geometry in tests and demos without
//! pulling in a physics engine.

use crate::math::Vec3;
use crate::probe::{Probe, TriggerPolicy};
use crate::scene::query::{HitResult, SpatialQuery};

/// Analytic obstacle geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape {
    Sphere { center: Vec3, radius: f32 },
    /// Points `x` with `normal.dot(x) == offset`. `normal` is unit length.
    Plane { normal: Vec3, offset: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub shape: ObstacleShape,
    /// Collision layer, 0..32. A probe sees the obstacle iff bit `layer` of
    /// its filter is set.
    pub layer: u8,
    /// Trigger volumes are reported only when the probe's trigger policy allows it.
    pub is_trigger: bool,
}

impl Obstacle {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self {
            shape: ObstacleShape::Sphere { center, radius },
            layer: 0,
            is_trigger: false,
        }
    }

    /// Plane through `point` facing `normal`. A zero `normal` yields a plane
    /// that no probe can hit.
    pub fn plane(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            shape: ObstacleShape::Plane {
                normal,
                offset: normal.dot(point),
            },
            layer: 0,
            is_trigger: false,
        }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Earliest contact of a sphere of `radius` swept from `origin` along unit
    /// `dir`, as `(distance, point, normal)`.
    ///
    /// Probes that start overlapping the obstacle report nothing.
    fn sweep(&self, origin: Vec3, dir: Vec3, radius: f32) -> Option<(f32, Vec3, Vec3)> {
        match self.shape {
            ObstacleShape::Sphere {
                center,
                radius: obstacle_radius,
            } => {
                let reach = obstacle_radius + radius;
                let oc = origin - center;
                let b = oc.dot(dir);
                let c = oc.length_squared() - reach * reach;
                if c <= 0.0 {
                    return None;
                }
                let discriminant = b * b - c;
                if discriminant < 0.0 {
                    return None;
                }
                let t = -b - discriminant.sqrt();
                if t < 0.0 {
                    return None;
                }
                let normal = (origin + dir * t - center).normalize_or_zero();
                Some((t, center + normal * obstacle_radius, normal))
            }
            ObstacleShape::Plane { normal, offset } => {
                let signed = normal.dot(origin) - offset;
                if signed.abs() <= radius {
                    return None;
                }
                let side = signed.signum();
                let approach = -side * normal.dot(dir);
                if approach <= 0.0 {
                    return None;
                }
                let t = (signed.abs() - radius) / approach;
                let facing = normal * side;
                Some((t, origin + dir * t - facing * radius, facing))
            }
        }
    }
}

/// Flat list of analytic obstacles implementing [`SpatialQuery`].
///
/// The filter is read as a layer bitmask and
/// [`TriggerPolicy::UseGlobalDefault`] resolves to the scene's own setting
/// (triggers ignored unless [`StaticScene::hit_triggers_by_default`] is set).
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    obstacles: Vec<Obstacle>,
    hit_triggers_by_default: bool,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how `TriggerPolicy::UseGlobalDefault` probes treat triggers.
    pub fn hit_triggers_by_default(mut self, hit: bool) -> Self {
        self.hit_triggers_by_default = hit;
        self
    }

    pub fn add(&mut self, obstacle: Obstacle) -> &mut Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32) -> &mut Self {
        self.add(Obstacle::sphere(center, radius))
    }

    pub fn add_plane(&mut self, point: Vec3, normal: Vec3) -> &mut Self {
        self.add(Obstacle::plane(point, normal))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    fn accepts(&self, obstacle: &Obstacle, probe: &Probe) -> bool {
        let on_layer = 1u32
            .checked_shl(obstacle.layer as u32)
            .is_some_and(|bit| probe.filter.0 as u32 & bit != 0);
        if !on_layer {
            return false;
        }

        !obstacle.is_trigger
            || match probe.trigger_policy {
                TriggerPolicy::Ignore => false,
                TriggerPolicy::Collide => true,
                TriggerPolicy::UseGlobalDefault => self.hit_triggers_by_default,
            }
    }
}

impl SpatialQuery for StaticScene {
    fn cast(&self, probe: &Probe) -> Option<HitResult> {
        let dir = probe.direction_normalized();
        if dir == Vec3::ZERO {
            return None;
        }
        let radius = probe.radius();

        self.obstacles
            .iter()
            .filter(|obstacle| self.accepts(obstacle, probe))
            .filter_map(|obstacle| obstacle.sweep(probe.origin, dir, radius))
            .filter(|(t, _, _)| *t <= probe.max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, point, normal)| HitResult::new(point, normal, t))
    }
}
