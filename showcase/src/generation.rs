use bevy::prelude::*;
use freight_scene::core::seeded_or_not::SeededOrNot;
use freight_scene::spawning::scene_spawning::RebuildScene;

pub(crate) fn reseed_on_space(
    keys: Res<ButtonInput<KeyCode>>,
    mut rebuild_writer: EventWriter<RebuildScene>,
) {
    if !keys.just_pressed(KeyCode::Space) { return; }

    // Fresh, non-deterministic seed from system time
    rebuild_writer.send(RebuildScene { seed: SeededOrNot::Unseeded });
}
