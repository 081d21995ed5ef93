use bevy::prelude::*;
use crate::core::components::MainDirectionalLight;
use crate::serialization::scene_config::LightingConfig;

pub(crate) fn spawn_sun(
    commands: &mut Commands,
    lighting: &LightingConfig,
) -> Entity {
    commands.spawn_empty()
        .insert(DirectionalLight {
            illuminance: lighting.sun_illuminance,
            shadows_enabled: true,
            ..default()
        })
        .insert(Transform::from_translation(lighting.sun_position).looking_at(Vec3::ZERO, Vec3::Y))
        .insert(Name::new("Sun"))
        .insert(MainDirectionalLight)
        .id()
}

// Stands in for a sky/ground hemisphere light: cool ambient fill from everywhere.
pub(crate) fn ambient_fill(lighting: &LightingConfig) -> AmbientLight {
    AmbientLight {
        color: Color::srgb(0.85, 0.88, 1.0),
        brightness: lighting.ambient_brightness,
    }
}
