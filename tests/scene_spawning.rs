use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use freight_scene::core::components::{FreightRoot, SceneSlot};
use freight_scene::serialization::scene_config::SceneConfig;
use freight_scene::spawning::helpers::GenRng;
use freight_scene::spawning::scene_spawning::{spawn_freight_scene, SceneDisabled};
use freight_scene::systems::animation::AnimatedScene;

fn app_with_window(width: f32) -> App {
    let mut app = App::new();
    app.insert_resource(SceneConfig::default())
        .insert_resource(GenRng::new(132))
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .add_systems(Startup, spawn_freight_scene);
    app.world_mut().spawn((
        Window {
            resolution: (width, 720.0).into(),
            ..default()
        },
        PrimaryWindow,
    ));
    app
}

#[test]
fn narrow_viewport_skips_the_scene() {
    let mut app = app_with_window(600.0);
    app.update();

    assert!(app.world().get_resource::<SceneDisabled>().is_some());
    assert!(app.world().get_resource::<AnimatedScene>().is_none());
    let roots = app.world_mut().query_filtered::<Entity, With<FreightRoot>>().iter(app.world()).count();
    assert_eq!(roots, 0);
}

#[test]
fn viewport_at_the_threshold_is_still_too_narrow() {
    let mut app = app_with_window(640.0);
    app.update();
    assert!(app.world().get_resource::<SceneDisabled>().is_some());
}

#[test]
fn wide_viewport_spawns_every_slot() {
    let mut app = app_with_window(1280.0);
    app.update();

    assert!(app.world().get_resource::<SceneDisabled>().is_none());
    let slots = app.world().resource::<AnimatedScene>().scene.len();
    let tagged = app.world_mut().query::<&SceneSlot>().iter(app.world()).count();
    // Particles get one entity each on a single slot.
    assert_eq!(tagged, slots - 1 + SceneConfig::default().particles.count);
}
