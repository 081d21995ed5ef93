use bevy::app::{App, Plugin};
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use crate::input_manager::InputStates;
use freight_scene::core::components::{MainCamera, Truck};
use freight_scene::serialization::scene_config::SceneConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, initialize_camera_system)
            .add_systems(Update, (toggle_follow_system, camera_controller_system).chain());
    }
}

/// Spherical position of the camera around its focus.
#[derive(Resource, Debug)]
pub(crate) struct OrbitState {
    focus: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    follow_truck: bool,
}

impl OrbitState {
    fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.focus + offset * self.distance
    }
}

pub(crate) fn initialize_camera_system(
    mut commands: Commands,
    config: Res<SceneConfig>,
) {
    let camera = &config.camera;
    let offset = camera.position - camera.look_at;
    let distance = offset.length().max(f32::EPSILON);

    let orbit = OrbitState {
        focus: camera.look_at,
        yaw: offset.x.atan2(offset.z),
        pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
        distance: distance.clamp(camera.min_distance, camera.max_distance),
        min_distance: camera.min_distance,
        max_distance: camera.max_distance,
        follow_truck: false,
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(orbit.eye()).looking_at(orbit.focus, Vec3::Y),
        Name::new("MainCamera"),
        MainCamera,
    ));
    commands.insert_resource(orbit);
}

fn toggle_follow_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut orbit: ResMut<OrbitState>,
    config: Res<SceneConfig>,
) {
    if keys.just_pressed(KeyCode::KeyF) {
        orbit.follow_truck = !orbit.follow_truck;
        if !orbit.follow_truck {
            orbit.focus = config.camera.look_at;
        }
        info!("camera follow: {}", orbit.follow_truck);
    }
}

fn camera_controller_system(
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Truck>)>,
    truck_query: Query<&GlobalTransform, With<Truck>>,
    mut mouse_wheel_events: EventReader<MouseWheel>,
    mut input: ResMut<InputStates>,
    mut orbit: ResMut<OrbitState>,
) {
    let Ok(mut cam_trans) = camera_query.get_single_mut() else { return };

    for event in mouse_wheel_events.read() {
        let zoomed = orbit.distance * (1.0 - event.y * 0.1);
        orbit.distance = zoomed.clamp(orbit.min_distance, orbit.max_distance);
    }

    let drag = std::mem::take(&mut input.drag);
    orbit.yaw -= drag.x * 0.005;
    orbit.pitch = (orbit.pitch + drag.y * 0.005).clamp(0.05, 1.4);

    if orbit.follow_truck {
        if let Ok(truck) = truck_query.get_single() {
            orbit.focus = truck.translation();
        }
    }

    cam_trans.translation = orbit.eye();
    cam_trans.look_at(orbit.focus, Vec3::Y);
}
