use bevy::prelude::*;
use bevy::utils::HashMap;
use crate::core::components::{DashedLine, ParticleIndex, SceneSlot};
use crate::core::composer::SceneLayout;
use crate::core::scene::{Scene, SceneSink};
use crate::core::transform::{SlotId, SlotUpdate};
use crate::spawning::helpers::{euler_rotation, hex, GenRng};

/// The running scene together with the slot map it was composed with.
#[derive(Resource)]
pub struct AnimatedScene {
    pub scene: Scene,
    pub layout: SceneLayout,
}

/// Entities driven by each slot. Particle slots list one entity per particle, in field order.
#[derive(Resource, Default, Debug)]
pub struct SlotTargets(pub HashMap<SlotId, Vec<Entity>>);

/// Count of scene ticks pushed to the world.
#[derive(Resource, Default, Debug)]
pub struct PresentedFrames(pub u64);

/// Writes slot updates straight into the transforms of the entities bound to them.
pub struct TransformSink<'a, 'w, 's> {
    pub targets: &'a SlotTargets,
    pub transforms: &'a mut Query<'w, 's, &'static mut Transform, With<SceneSlot>>,
    pub frames: &'a mut PresentedFrames,
}

impl SceneSink for TransformSink<'_, '_, '_> {
    fn apply(&mut self, slot: SlotId, update: SlotUpdate<'_>) {
        let Some(entities) = self.targets.0.get(&slot) else { return };

        if let SlotUpdate::Particles(positions) = update {
            for (entity, position) in entities.iter().zip(positions) {
                if let Ok(mut transform) = self.transforms.get_mut(*entity) {
                    transform.translation = *position;
                }
            }
            return;
        }

        for entity in entities {
            let Ok(mut transform) = self.transforms.get_mut(*entity) else { continue };
            match update {
                SlotUpdate::Placed(placed) => {
                    transform.translation = placed.position;
                    transform.rotation = Quat::from_rotation_y(placed.orientation_angle);
                }
                SlotUpdate::Spun(angles) => transform.rotation = euler_rotation(angles),
                SlotUpdate::Moved(position) => transform.translation = position,
                SlotUpdate::Particles(_) => {}
            }
        }
    }

    fn render_frame(&mut self) {
        self.frames.0 += 1;
    }
}

pub fn index_scene_slots(
    added: Query<(), Added<SceneSlot>>,
    slots: Query<(Entity, &SceneSlot, Option<&ParticleIndex>)>,
    mut targets: ResMut<SlotTargets>,
) {
    if added.is_empty() {
        return;
    }

    let mut indexed: HashMap<SlotId, Vec<(usize, Entity)>> = HashMap::default();
    for (entity, slot, particle) in slots.iter() {
        let order = particle.map_or(0, |index| index.0);
        indexed.entry(slot.0).or_default().push((order, entity));
    }

    targets.0 = indexed
        .into_iter()
        .map(|(slot, mut entities)| {
            entities.sort_by_key(|(order, _)| *order);
            (slot, entities.into_iter().map(|(_, entity)| entity).collect())
        })
        .collect();
    debug!("indexed {} scene slots", targets.0.len());
}

pub fn animate_scene(
    time: Res<Time>,
    animated: Option<ResMut<AnimatedScene>>,
    targets: Res<SlotTargets>,
    mut gen_rng: ResMut<GenRng>,
    mut frames: ResMut<PresentedFrames>,
    mut transforms: Query<'_, '_, &'static mut Transform, With<SceneSlot>>,
) {
    let Some(mut animated) = animated else { return };
    let mut sink = TransformSink {
        targets: &targets,
        transforms: &mut transforms,
        frames: &mut frames,
    };
    animated.scene.step_all(time.delta_secs(), gen_rng.rng_mut(), &mut sink);
}

pub fn draw_dashed_lines(
    mut gizmos: Gizmos,
    lines: Query<(&DashedLine, &GlobalTransform)>,
) {
    let color = hex(0xfff3d6);
    for (line, global) in lines.iter() {
        for (start, end) in &line.0 {
            gizmos.line(global.transform_point(*start), global.transform_point(*end), color);
        }
    }
}
