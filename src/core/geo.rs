use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    pub const fn new(lat: f32, lon: f32) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn to_vec3(self, radius: f32) -> Vec3 {
        lat_lon_to_vec3(self.lat, self.lon, radius)
    }
}

/// Point on a sphere centred at the origin, +Y through the north pole.
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Three control points for a route arcing away from the sphere: both ends on the surface,
/// the chord midpoint pushed outward by `lift`.
pub fn route_arc(from: GeoPoint, to: GeoPoint, radius: f32, lift: f32) -> Vec<Vec3> {
    let a = from.to_vec3(radius);
    let b = to.to_vec3(radius);
    let mid = a.lerp(b, 0.5) * lift;
    vec![a, mid, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poles_and_equator() {
        assert!((lat_lon_to_vec3(90.0, 0.0, 4.0) - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-5);
        assert!((lat_lon_to_vec3(-90.0, 0.0, 4.0) - Vec3::new(0.0, -4.0, 0.0)).length() < 1e-5);
        // lon 0 on the equator lands on +X
        assert!((lat_lon_to_vec3(0.0, 0.0, 4.0) - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn points_lie_on_the_sphere() {
        let mumbai = GeoPoint::new(19.0, 72.8);
        assert!((mumbai.to_vec3(4.02).length() - 4.02).abs() < 1e-4);
    }

    #[test]
    fn arc_bulges_outward() {
        let points = route_arc(GeoPoint::new(19.0, 72.8), GeoPoint::new(48.85, 2.35), 4.02, 1.25);
        assert_eq!(points.len(), 3);
        let chord_mid = points[0].lerp(points[2], 0.5);
        assert!((points[1].length() - chord_mid.length() * 1.25).abs() < 1e-4);
    }
}
