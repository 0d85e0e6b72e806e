//! Math types for arcscan

pub use glam::{Quat, Vec3};

/// Position and orientation of whatever is doing the sensing.
///
/// The engine itself only works on `(origin, direction)` pairs. `Pose` is the
/// caller-side adapter for agents that carry an orientation instead of an
/// explicit look direction; see [`ScanRequest::from_pose`](crate::ScanRequest::from_pose).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Builds a pose at `position` whose forward axis points along `direction`.
    ///
    /// A zero `direction` leaves the rotation at identity.
    pub fn looking_along(position: Vec3, direction: Vec3) -> Self {
        let forward = direction.normalize_or_zero();
        let rotation = if forward == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::NEG_Z, forward)
        };
        Self { position, rotation }
    }

    /// Forward axis, -Z in local space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotates `direction` by `degrees` about `axis` (right-handed).
///
/// `axis` is expected to be unit length.
pub(crate) fn rotate_about(direction: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    Quat::from_axis_angle(axis, degrees.to_radians()) * direction
}
