use bevy::math::Vec3;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use crate::core::entity_state::Oscillation;
use crate::core::geo::GeoPoint;
use crate::core::scene::DEFAULT_CLOCK_STEP;
use crate::core::seeded_or_not::SeededOrNot;

/// Everything needed to compose the freight scene. Every field falls back to the tuned
/// defaults, so a RON document only has to name what it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Resource)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: SeededOrNot,
    pub clock_step: f32,
    /// Viewports this narrow or narrower skip the 3D scene entirely.
    pub min_viewport_width: f32,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub globe: GlobeConfig,
    pub routes: RouteConfig,
    pub truck: TruckConfig,
    pub particles: ParticleConfig,
    pub crates: CrateConfig,
    pub convoy: ConvoyConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            seed: SeededOrNot::Seeded(132),
            clock_step: DEFAULT_CLOCK_STEP,
            min_viewport_width: 640.0,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            globe: GlobeConfig::default(),
            routes: RouteConfig::default(),
            truck: TruckConfig::default(),
            particles: ParticleConfig::default(),
            crates: CrateConfig::default(),
            convoy: ConvoyConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn wants_3d(&self, viewport_width: f32) -> bool {
        viewport_width > self.min_viewport_width
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: Vec3::new(0.0, 6.0, 18.0),
            look_at: Vec3::ZERO,
            fov_degrees: 40.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 8.0,
            max_distance: 40.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub sun_illuminance: f32,
    pub sun_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig {
            ambient_brightness: 400.0,
            sun_illuminance: 6000.0,
            sun_position: Vec3::new(10.0, 20.0, 10.0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    pub center: Vec3,
    pub radius: f32,
    /// Radians per tick around Y.
    pub spin_rate: f32,
    pub spin_wobble: Oscillation,
    /// Absolute X tilt.
    pub tilt: Oscillation,
    /// Vertical bob of the whole globe group.
    pub bob: Oscillation,
    /// Radius markers and route endpoints sit at, slightly above the surface.
    pub surface_radius: f32,
    pub ports: Vec<GeoPoint>,
    /// Latitude rings at indices `-ring_count..=ring_count`.
    pub ring_count: i32,
    pub ring_spacing: f32,
    pub ring_tilt: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        GlobeConfig {
            center: Vec3::new(-5.0, 1.5, 0.0),
            radius: 4.0,
            spin_rate: 0.003,
            spin_wobble: Oscillation { amplitude: 0.001, frequency: 0.6 },
            tilt: Oscillation { amplitude: 0.02, frequency: 0.08 },
            bob: Oscillation { amplitude: 0.06, frequency: 0.6 },
            surface_radius: 4.02,
            ports: vec![
                GeoPoint::new(19.0, 72.8),
                GeoPoint::new(31.2, 121.5),
                GeoPoint::new(40.7, -74.0),
                GeoPoint::new(48.85, 2.35),
                GeoPoint::new(30.0, 31.2),
            ],
            ring_count: 3,
            ring_spacing: 0.3,
            ring_tilt: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RoutePair {
    pub from: GeoPoint,
    pub to: GeoPoint,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    pub pairs: Vec<RoutePair>,
    /// Outward scale applied to each route's chord midpoint.
    pub lift: f32,
    pub tube_radius: f32,
    pub shipment_speed: f32,
    pub shipment_jitter: f32,
}

impl Default for RouteConfig {
    fn default() -> Self {
        RouteConfig {
            pairs: vec![
                RoutePair { from: GeoPoint::new(19.0, 72.8), to: GeoPoint::new(48.85, 2.35) },
                RoutePair { from: GeoPoint::new(31.2, 121.5), to: GeoPoint::new(40.7, -74.0) },
                RoutePair { from: GeoPoint::new(19.0, 72.8), to: GeoPoint::new(30.0, 31.2) },
            ],
            lift: 1.25,
            tube_radius: 0.03,
            shipment_speed: 0.002,
            shipment_jitter: 0.002,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TruckConfig {
    pub road: Vec<Vec3>,
    pub speed: f32,
    pub throttle: Oscillation,
    /// Radians per tick around the axle.
    pub wheel_spin: f32,
    /// Wheel hubs in truck space; the truck faces +Z.
    pub wheel_offsets: Vec<Vec3>,
    pub road_radius: f32,
    pub dash_length: f32,
    pub dash_gap: f32,
}

impl Default for TruckConfig {
    fn default() -> Self {
        TruckConfig {
            road: vec![
                Vec3::new(8.0, 0.4, -10.0),
                Vec3::new(6.0, 0.4, -4.0),
                Vec3::new(4.0, 0.4, -1.5),
                Vec3::new(2.0, 0.4, 1.5),
                Vec3::new(-1.0, 0.4, 4.0),
                Vec3::new(-4.0, 0.4, 6.0),
                Vec3::new(-8.0, 0.4, 8.0),
            ],
            speed: 0.0009,
            throttle: Oscillation { amplitude: 0.5, frequency: 0.6 },
            wheel_spin: -0.18,
            wheel_offsets: vec![
                Vec3::new(0.6, 0.2, -1.0),
                Vec3::new(-0.6, 0.2, -1.0),
                Vec3::new(0.6, 0.2, 0.3),
                Vec3::new(-0.6, 0.2, 0.3),
            ],
            road_radius: 0.12,
            dash_length: 0.6,
            dash_gap: 0.6,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Spawn box size; x and z are centred on the origin, y starts at `floor`.
    pub extent: Vec3,
    pub floor: f32,
    pub step: f32,
    pub bound: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            count: 220,
            extent: Vec3::new(80.0, 6.0, 60.0),
            floor: 0.5,
            step: 0.02,
            bound: 40.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CrateConfig {
    pub count: usize,
    pub center: Vec3,
    /// Spawn box size; x and z are centred on `center`, y rises from it.
    pub spread: Vec3,
    pub spin: Vec3,
}

impl Default for CrateConfig {
    fn default() -> Self {
        CrateConfig {
            count: 20,
            center: Vec3::new(4.0, 6.0, -14.0),
            spread: Vec3::new(10.0, 5.0, 8.0),
            spin: Vec3::new(0.005, 0.008, 0.0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Truck,
    Ship,
    Plane,
}

/// One looping icon; speeds and distances are in lane units, scaled by `ConvoyConfig::scale`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConvoyIcon {
    pub kind: IconKind,
    pub speed: f32,
    pub span: f32,
    pub lead_in: f32,
    pub lane: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConvoyConfig {
    pub origin: Vec3,
    pub scale: f32,
    pub icons: Vec<ConvoyIcon>,
}

impl Default for ConvoyConfig {
    fn default() -> Self {
        ConvoyConfig {
            origin: Vec3::new(-8.5, 0.3, -18.0),
            scale: 0.02,
            icons: vec![
                ConvoyIcon { kind: IconKind::Truck, speed: 60.0, span: 850.0, lead_in: 50.0, lane: 0.0 },
                ConvoyIcon { kind: IconKind::Ship, speed: 30.0, span: 860.0, lead_in: 60.0, lane: 60.0 },
                ConvoyIcon { kind: IconKind::Plane, speed: 120.0, span: 860.0, lead_in: 60.0, lane: 120.0 },
            ],
        }
    }
}
