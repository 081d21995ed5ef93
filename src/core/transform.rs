use bevy::math::Vec3;
use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

/// Handle the [`Scene`](crate::core::scene::Scene) gives out for every animated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// Where a path-bound entity sits this tick and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTransform {
    pub position: Vec3,
    /// Yaw in radians around +Y. Zero faces +Z, a +X heading is pi/2.
    pub orientation_angle: f32,
}

impl PathTransform {
    pub fn from_tangent(position: Vec3, tangent: Vec3) -> Self {
        PathTransform {
            position,
            orientation_angle: heading_from_tangent(tangent),
        }
    }
}

// Pitch and roll are dropped; only the horizontal heading survives.
pub fn heading_from_tangent(tangent: Vec3) -> f32 {
    tangent.x.atan2(tangent.z)
}

/// One write handed to a [`SceneSink`](crate::core::scene::SceneSink) during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotUpdate<'a> {
    /// Path follower: new position and heading.
    Placed(PathTransform),
    /// Absolute Euler angles, XYZ order.
    Spun(Vec3),
    /// New translation, heading untouched.
    Moved(Vec3),
    /// Every particle position of a field, in spawn order.
    Particles(&'a [Vec3]),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn heading_convention() {
        assert!((heading_from_tangent(Vec3::X) - FRAC_PI_2).abs() < 1e-6);
        assert!(heading_from_tangent(Vec3::Z).abs() < 1e-6);
        assert!((heading_from_tangent(Vec3::NEG_Z).abs() - PI).abs() < 1e-6);
        assert!((heading_from_tangent(Vec3::NEG_X) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn vertical_component_is_ignored() {
        let flat = heading_from_tangent(Vec3::new(1.0, 0.0, 1.0));
        let climbing = heading_from_tangent(Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(flat, climbing);
    }
}
