use bevy::app::{App, Plugin};
use bevy::prelude::*;

use crate::spawning::helpers::GenRng;
use crate::core::components::{DashedLine, ParticleIndex, SceneSlot};
use crate::serialization::scene_config::SceneConfig;
use crate::spawning::scene_spawning::{rebuild_on_request, spawn_freight_scene, RebuildScene};
use crate::systems::animation::{animate_scene, draw_dashed_lines, index_scene_slots, PresentedFrames, SlotTargets};

/// Composes the freight scene at startup and animates it every frame.
///
/// Uses an already inserted [`SceneConfig`] when there is one, the defaults otherwise.
pub struct FreightScenePlugin;

impl Plugin for FreightScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>();
        let seed = app.world().resource::<SceneConfig>().seed.clone();

        app
            .insert_resource(GenRng::from_choice(&seed))
            .init_resource::<SlotTargets>()
            .init_resource::<PresentedFrames>()
            .add_event::<RebuildScene>()
            .register_type::<SceneSlot>()
            .register_type::<ParticleIndex>()
            .register_type::<DashedLine>()
            .add_systems(Startup, spawn_freight_scene)
            .add_systems(Update, (
                rebuild_on_request,
                index_scene_slots,
                animate_scene,
                draw_dashed_lines,
            ).chain());
    }
}
