use std::time::Duration;
use bevy::prelude::*;
use bevy_prng::WyRand;
use rand::SeedableRng;
use freight_scene::core::components::{ParticleIndex, SceneSlot};
use freight_scene::core::composer::compose_scene;
use freight_scene::core::scene::Animator;
use freight_scene::serialization::scene_config::SceneConfig;
use freight_scene::spawning::helpers::GenRng;
use freight_scene::systems::animation::{
    animate_scene, index_scene_slots, AnimatedScene, PresentedFrames, SlotTargets,
};

fn headless_app() -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default())
        .insert_resource(GenRng::new(5))
        .init_resource::<SlotTargets>()
        .init_resource::<PresentedFrames>()
        .add_systems(Update, (index_scene_slots, animate_scene).chain());
    app
}

fn advance(app: &mut App, seconds: f32) {
    app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

#[test]
fn frame_writes_truck_and_particle_transforms() {
    let mut app = headless_app();
    let mut rng = WyRand::seed_from_u64(132);
    let (scene, layout) = compose_scene(&SceneConfig::default(), &mut rng).unwrap();

    let truck = app.world_mut().spawn((Transform::default(), SceneSlot(layout.truck))).id();
    // Spawned out of order; the index has to sort them.
    let particles: Vec<(usize, Entity)> = [2usize, 0, 1]
        .into_iter()
        .map(|index| {
            let entity = app.world_mut()
                .spawn((Transform::default(), SceneSlot(layout.particles), ParticleIndex(index)))
                .id();
            (index, entity)
        })
        .collect();
    app.insert_resource(AnimatedScene { scene, layout });

    advance(&mut app, 1.0 / 60.0);

    assert_eq!(app.world().resource::<PresentedFrames>().0, 1);

    let animated = app.world().resource::<AnimatedScene>();
    let expected = animated.scene.mover(animated.layout.truck).unwrap().transform();
    let field = match animated.scene.animator(animated.layout.particles) {
        Some(Animator::Particles(field)) => field.positions.clone(),
        other => panic!("unexpected animator {other:?}"),
    };

    let truck_transform = app.world().get::<Transform>(truck).unwrap();
    assert!(truck_transform.translation.distance(expected.position) < 1e-5);
    assert!(truck_transform.rotation.abs_diff_eq(Quat::from_rotation_y(expected.orientation_angle), 1e-5));

    for (index, entity) in particles {
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, field[index]);
    }
}

#[test]
fn frames_without_a_scene_do_nothing() {
    let mut app = headless_app();
    advance(&mut app, 1.0 / 60.0);
    assert_eq!(app.world().resource::<PresentedFrames>().0, 0);
}

#[test]
fn longer_frames_move_further() {
    let progress_after = |seconds: f32| {
        let mut app = headless_app();
        let mut rng = WyRand::seed_from_u64(1);
        let mut config = SceneConfig::default();
        config.routes.shipment_jitter = 0.0;
        let (scene, layout) = compose_scene(&config, &mut rng).unwrap();
        let shipment = layout.routes[0].shipment;
        let start = scene.mover(shipment).unwrap().progress;
        app.insert_resource(AnimatedScene { scene, layout });
        advance(&mut app, seconds);
        let animated = app.world().resource::<AnimatedScene>();
        let end = animated.scene.mover(shipment).unwrap().progress;
        (end - start).rem_euclid(1.0)
    };

    let short = progress_after(1.0 / 60.0);
    let long = progress_after(2.0 / 60.0);
    assert!((short - 0.002).abs() < 1e-4);
    assert!((long - 2.0 * short).abs() < 1e-4);
}
