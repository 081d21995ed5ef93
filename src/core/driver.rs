use bevy::log::debug;
use rand::Rng;
use crate::core::scene::{Scene, SceneSink};

/// Ticks `scene` until `stop` returns true. `stop` is checked before every tick, so a
/// predicate that is already satisfied runs nothing. Returns the number of ticks run.
pub fn run_until<R, S, F>(scene: &mut Scene, sink: &mut S, rng: &mut R, mut stop: F) -> u64
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
    F: FnMut(&Scene) -> bool,
{
    let mut ran = 0;
    while !stop(scene) {
        scene.tick(rng, sink);
        ran += 1;
    }
    debug!("driver stopped after {} ticks (scene at tick {})", ran, scene.ticks());
    ran
}

pub fn run_ticks<R, S>(scene: &mut Scene, sink: &mut S, rng: &mut R, ticks: u64) -> u64
where
    R: Rng + ?Sized,
    S: SceneSink + ?Sized,
{
    let target = scene.ticks() + ticks;
    run_until(scene, sink, rng, |scene| scene.ticks() >= target)
}
