use std::f32::consts::FRAC_PI_2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::core::components::{DashedLine, FreightRoot, ParticleIndex, SceneSlot, Truck};
use crate::core::composer::{compose_scene, SceneLayout};
use crate::core::scene::{Animator, Scene};
use crate::core::seeded_or_not::SeededOrNot;
use crate::serialization::scene_config::{IconKind, SceneConfig};
use crate::spawning::helpers::{hex, GenRng};
use crate::spawning::light_spawning::{ambient_fill, spawn_sun};
use crate::spawning::tube_mesh::tube_mesh;
use crate::systems::animation::AnimatedScene;

const ROUTE_TUBE_SEGMENTS: usize = 120;
const ROAD_TUBE_SEGMENTS: usize = 200;

/// Shown in place of the scene on narrow viewports.
pub const FALLBACK_MESSAGE: &str = "3D preview disabled on small screens";

/// Present when the viewport was too narrow for the 3D scene.
#[derive(Resource)]
pub struct SceneDisabled;

/// Requests a fresh composition, e.g. after reseeding.
#[derive(Event, Debug, Clone)]
pub struct RebuildScene {
    pub seed: SeededOrNot,
}

pub fn spawn_freight_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gen_rng: ResMut<GenRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if let Ok(window) = windows.get_single() {
        if !config.wants_3d(window.width()) {
            info!("viewport {}px wide, 3D scene disabled", window.width());
            commands.insert_resource(SceneDisabled);
            return;
        }
    }

    build_scene(&mut commands, &config, &mut gen_rng, &mut meshes, &mut materials);
}

pub fn rebuild_on_request(
    mut commands: Commands,
    mut requests: EventReader<RebuildScene>,
    disabled: Option<Res<SceneDisabled>>,
    config: Res<SceneConfig>,
    roots: Query<Entity, With<FreightRoot>>,
    mut gen_rng: ResMut<GenRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(request) = requests.read().last() else { return };
    if disabled.is_some() {
        debug!("rebuild ignored, 3D scene disabled");
        return;
    }

    for root in roots.iter() {
        commands.entity(root).despawn_recursive();
    }
    commands.remove_resource::<AnimatedScene>();
    let seed = request.seed.resolve();
    *gen_rng = GenRng::new(seed);
    info!("rebuilding freight scene with seed {}", seed);

    build_scene(&mut commands, &config, &mut gen_rng, &mut meshes, &mut materials);
}

fn build_scene(
    commands: &mut Commands,
    config: &SceneConfig,
    gen_rng: &mut GenRng,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let (scene, layout) = match compose_scene(config, gen_rng.rng_mut()) {
        Ok(composed) => composed,
        Err(error) => {
            error!("freight scene not built: {}", error);
            return;
        }
    };

    let root = commands.spawn_empty()
        .insert(Name::new("FreightRoot"))
        .insert(Transform::default())
        .insert(Visibility::default())
        .insert(FreightRoot)
        .id();

    let sun = spawn_sun(commands, &config.lighting);
    commands.entity(sun).set_parent(root);
    commands.insert_resource(ambient_fill(&config.lighting));

    let ground = commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(80.0, 60.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex(0x071025),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.5, 0.0),
        Name::new("Ground"),
    )).id();
    commands.entity(ground).set_parent(root);

    spawn_globe(commands, root, config, &layout, meshes, materials);
    spawn_truck_and_road(commands, root, config, &layout, meshes, materials);
    spawn_ambient(commands, root, &layout, &scene, meshes, materials);
    spawn_convoy(commands, root, &layout, meshes, materials);

    info!("freight scene built: {} animated slots", scene.len());
    commands.insert_resource(AnimatedScene { scene, layout });
}

fn spawn_globe(
    commands: &mut Commands,
    root: Entity,
    config: &SceneConfig,
    layout: &SceneLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let globe_config = &config.globe;
    let group = commands.spawn((
        Transform::from_translation(globe_config.center),
        Visibility::default(),
        Name::new("GlobeGroup"),
        SceneSlot(layout.globe_group),
    )).set_parent(root).id();

    let globe = commands.spawn((
        Mesh3d(meshes.add(Sphere::new(globe_config.radius).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex(0x0c3b66),
            metallic: 0.05,
            perceptual_roughness: 0.7,
            emissive: hex(0x00121a).into(),
            ..default()
        })),
        Transform::default(),
        Name::new("Globe"),
        SceneSlot(layout.globe),
    )).id();
    commands.entity(group).add_child(globe);

    let ring_material = materials.add(StandardMaterial {
        base_color: hex(0x0f3f5f).with_alpha(0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    for i in -globe_config.ring_count..=globe_config.ring_count {
        let ring_radius = globe_config.radius * (i as f32 * globe_config.ring_spacing).cos();
        let ring = commands.spawn((
            Mesh3d(meshes.add(Torus { minor_radius: 0.01, major_radius: ring_radius })),
            MeshMaterial3d(ring_material.clone()),
            Transform::from_rotation(Quat::from_rotation_x(-(i as f32) * globe_config.ring_tilt)),
            Name::new(format!("LatitudeRing{}", i)),
        )).id();
        commands.entity(group).add_child(ring);
    }

    let marker_mesh = meshes.add(Sphere::new(0.08).mesh().uv(8, 6));
    let marker_material = materials.add(StandardMaterial {
        base_color: hex(0xffb703),
        emissive: hex(0x332000).into(),
        ..default()
    });
    for port in &globe_config.ports {
        let marker = commands.spawn((
            Mesh3d(marker_mesh.clone()),
            MeshMaterial3d(marker_material.clone()),
            Transform::from_translation(port.to_vec3(globe_config.surface_radius)),
            Name::new("PortMarker"),
        )).id();
        commands.entity(group).add_child(marker);
    }

    let route_material = materials.add(StandardMaterial {
        base_color: hex(0xffd59e).with_alpha(0.9),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let shipment_mesh = meshes.add(Sphere::new(0.08).mesh().uv(8, 6));
    let shipment_material = materials.add(StandardMaterial {
        base_color: hex(0xff6b6b),
        emissive: hex(0x220000).into(),
        ..default()
    });
    for (index, route) in layout.routes.iter().enumerate() {
        let tube = commands.spawn((
            Mesh3d(meshes.add(tube_mesh(&route.path, ROUTE_TUBE_SEGMENTS, config.routes.tube_radius, 8))),
            MeshMaterial3d(route_material.clone()),
            Transform::default(),
            Name::new(format!("Route{}", index)),
        )).id();
        let shipment = commands.spawn((
            Mesh3d(shipment_mesh.clone()),
            MeshMaterial3d(shipment_material.clone()),
            Transform::from_translation(route.path.point_at(0.0)),
            Name::new(format!("Shipment{}", index)),
            SceneSlot(route.shipment),
        )).id();
        commands.entity(group).add_children(&[tube, shipment]);
    }
}

fn spawn_truck_and_road(
    commands: &mut Commands,
    root: Entity,
    config: &SceneConfig,
    layout: &SceneLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let truck_config = &config.truck;
    let truck = commands.spawn((
        Transform::from_translation(layout.road.point_at(0.0)),
        Visibility::default(),
        Name::new("Truck"),
        Truck,
        SceneSlot(layout.truck),
    )).set_parent(root).id();

    // Modelled facing +Z so a zero heading drives forward.
    let body = commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.3, 1.1, 3.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex(0xffb703),
            metallic: 0.2,
            perceptual_roughness: 0.4,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.6, 0.0),
        Name::new("TruckBody"),
    )).id();
    let cabin = commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.1, 0.9, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex(0xff6b6b),
            metallic: 0.2,
            perceptual_roughness: 0.4,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.55, 1.05),
        Name::new("TruckCabin"),
    )).id();
    commands.entity(truck).add_children(&[body, cabin]);

    let wheel_mesh = meshes.add(
        Mesh::from(Cylinder::new(0.22, 0.4)).rotated_by(Quat::from_rotation_z(FRAC_PI_2)),
    );
    let wheel_material = materials.add(StandardMaterial {
        base_color: hex(0x0b0b0b),
        metallic: 0.1,
        perceptual_roughness: 0.8,
        ..default()
    });
    for (offset, slot) in truck_config.wheel_offsets.iter().zip(&layout.wheels) {
        let wheel = commands.spawn((
            Mesh3d(wheel_mesh.clone()),
            MeshMaterial3d(wheel_material.clone()),
            Transform::from_translation(*offset),
            Name::new("Wheel"),
            SceneSlot(*slot),
        )).id();
        commands.entity(truck).add_child(wheel);
    }

    // Painted along the crown of the road tube.
    let lift = Vec3::Y * (truck_config.road_radius + 0.01);
    let lane_markings = layout.road
        .dashes(truck_config.dash_length, truck_config.dash_gap)
        .into_iter()
        .map(|(start, end)| (start + lift, end + lift))
        .collect();
    commands.spawn((
        Mesh3d(meshes.add(tube_mesh(&layout.road, ROAD_TUBE_SEGMENTS, truck_config.road_radius, 6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex(0x0c3150),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        Name::new("Road"),
        DashedLine(lane_markings),
    )).set_parent(root);
}

fn spawn_ambient(
    commands: &mut Commands,
    root: Entity,
    layout: &SceneLayout,
    scene: &Scene,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let particle_mesh = meshes.add(Sphere::new(0.03).mesh().uv(6, 4));
    let particle_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.85),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    if let Some(Animator::Particles(field)) = scene.animator(layout.particles) {
        for (index, position) in field.positions.iter().enumerate() {
            commands.spawn((
                Mesh3d(particle_mesh.clone()),
                MeshMaterial3d(particle_material.clone()),
                Transform::from_translation(*position),
                Name::new("Particle"),
                SceneSlot(layout.particles),
                ParticleIndex(index),
            )).set_parent(root);
        }
    }

    let crate_mesh = meshes.add(Cuboid::new(1.0, 1.0, 2.0));
    let crate_material = materials.add(StandardMaterial {
        base_color: hex(0xffb703),
        metallic: 0.5,
        perceptual_roughness: 0.4,
        ..default()
    });
    for cargo in &layout.crates {
        commands.spawn((
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(cargo.position),
            Name::new("CargoCrate"),
            SceneSlot(cargo.slot),
        )).set_parent(root);
    }
}

fn spawn_convoy(
    commands: &mut Commands,
    root: Entity,
    layout: &SceneLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial {
        base_color: hex(0xfff3d6),
        unlit: true,
        ..default()
    });
    for (kind, slot) in &layout.convoy {
        let mesh = match kind {
            IconKind::Truck => meshes.add(Cuboid::new(0.8, 0.4, 0.4)),
            IconKind::Ship => meshes.add(Cuboid::new(1.2, 0.3, 0.5)),
            IconKind::Plane => meshes.add(Cuboid::new(1.0, 0.12, 0.9)),
        };
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material.clone()),
            Transform::default(),
            Name::new(format!("{:?}Icon", kind)),
            SceneSlot(*slot),
        )).set_parent(root);
    }
}
