use bevy::prelude::*;
use crate::core::transform::SlotId;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component)]
pub struct MainDirectionalLight;

/// Everything spawned for one composition hangs under this entity so a rebuild can drop it whole.
#[derive(Component)]
pub struct FreightRoot;

// Links an entity to the scene slot that drives its transform.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct SceneSlot(pub SlotId);

// Position of a particle entity inside its field's slot.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct ParticleIndex(pub usize);

// Line segments drawn with gizmos every frame, in the entity's local space.
#[derive(Component, Clone, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct DashedLine(pub Vec<(Vec3, Vec3)>);

#[derive(Component)]
pub struct Truck;
