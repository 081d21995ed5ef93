use bevy::log::trace;
use rand::Rng;
use crate::core::entity_state::{Bob, Conveyor, MovingEntity, ParticleField, Spinner};
use crate::core::transform::{SlotId, SlotUpdate};

/// Display refresh the per-tick constants were tuned against.
pub const REFERENCE_TICK_RATE: f32 = 60.0;
/// Scene clock advance per reference tick; oscillations read this clock.
pub const DEFAULT_CLOCK_STEP: f32 = 0.015;

/// Consumer of the transforms produced each tick, typically a renderer.
pub trait SceneSink {
    fn apply(&mut self, slot: SlotId, update: SlotUpdate<'_>);
    /// Called once after every slot of a tick has been applied.
    fn render_frame(&mut self);
}

#[derive(Debug, Clone)]
pub enum Animator {
    Mover(MovingEntity),
    Spinner(Spinner),
    Bob(Bob),
    Particles(ParticleField),
    Conveyor(Conveyor),
}

impl From<MovingEntity> for Animator {
    fn from(value: MovingEntity) -> Self {
        Animator::Mover(value)
    }
}

impl From<Spinner> for Animator {
    fn from(value: Spinner) -> Self {
        Animator::Spinner(value)
    }
}

impl From<Bob> for Animator {
    fn from(value: Bob) -> Self {
        Animator::Bob(value)
    }
}

impl From<ParticleField> for Animator {
    fn from(value: ParticleField) -> Self {
        Animator::Particles(value)
    }
}

impl From<Conveyor> for Animator {
    fn from(value: Conveyor) -> Self {
        Animator::Conveyor(value)
    }
}

/// Owns every animated object of one scene and advances them together.
#[derive(Debug, Clone)]
pub struct Scene {
    animators: Vec<Animator>,
    clock: f32,
    clock_step: f32,
    elapsed: f32,
    ticks: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(DEFAULT_CLOCK_STEP)
    }
}

impl Scene {
    pub fn new(clock_step: f32) -> Self {
        Scene {
            animators: Vec::new(),
            clock: 0.0,
            clock_step,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn add(&mut self, animator: impl Into<Animator>) -> SlotId {
        self.animators.push(animator.into());
        SlotId(self.animators.len() - 1)
    }

    pub fn animator(&self, slot: SlotId) -> Option<&Animator> {
        self.animators.get(slot.0)
    }

    pub fn mover(&self, slot: SlotId) -> Option<&MovingEntity> {
        match self.animator(slot) {
            Some(Animator::Mover(mover)) => Some(mover),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances exactly one reference tick.
    pub fn tick<R, S>(&mut self, rng: &mut R, sink: &mut S)
    where
        R: Rng + ?Sized,
        S: SceneSink + ?Sized,
    {
        self.advance(1.0, rng, sink);
    }

    /// Advances by `dt` seconds of wall time, scaling every per-tick increment accordingly.
    pub fn step_all<R, S>(&mut self, dt: f32, rng: &mut R, sink: &mut S)
    where
        R: Rng + ?Sized,
        S: SceneSink + ?Sized,
    {
        let frames = if dt.is_finite() { dt.max(0.0) * REFERENCE_TICK_RATE } else { 0.0 };
        self.advance(frames, rng, sink);
    }

    /// Pushes the current state of every slot without advancing anything.
    pub fn publish<S: SceneSink + ?Sized>(&self, sink: &mut S) {
        let (clock, elapsed) = (self.clock, self.elapsed);
        for (index, animator) in self.animators.iter().enumerate() {
            let slot = SlotId(index);
            match animator {
                Animator::Mover(mover) => sink.apply(slot, SlotUpdate::Placed(mover.transform())),
                Animator::Spinner(spinner) => sink.apply(slot, SlotUpdate::Spun(spinner.angles)),
                Animator::Bob(bob) => sink.apply(slot, SlotUpdate::Moved(bob.position(clock))),
                Animator::Particles(field) => sink.apply(slot, SlotUpdate::Particles(&field.positions)),
                Animator::Conveyor(lane) => sink.apply(slot, SlotUpdate::Moved(lane.position(elapsed))),
            }
        }
        sink.render_frame();
    }

    fn advance<R, S>(&mut self, frames: f32, rng: &mut R, sink: &mut S)
    where
        R: Rng + ?Sized,
        S: SceneSink + ?Sized,
    {
        self.clock += self.clock_step * frames;
        self.elapsed += frames / REFERENCE_TICK_RATE;
        let (clock, elapsed) = (self.clock, self.elapsed);

        for (index, animator) in self.animators.iter_mut().enumerate() {
            let slot = SlotId(index);
            match animator {
                Animator::Mover(mover) => {
                    let placed = mover.advance(clock, frames, rng);
                    sink.apply(slot, SlotUpdate::Placed(placed));
                }
                Animator::Spinner(spinner) => {
                    let angles = spinner.advance(clock, frames);
                    sink.apply(slot, SlotUpdate::Spun(angles));
                }
                Animator::Bob(bob) => sink.apply(slot, SlotUpdate::Moved(bob.position(clock))),
                Animator::Particles(field) => {
                    let positions = field.advance(frames);
                    sink.apply(slot, SlotUpdate::Particles(positions));
                }
                Animator::Conveyor(lane) => sink.apply(slot, SlotUpdate::Moved(lane.position(elapsed))),
            }
        }

        self.ticks += 1;
        trace!("scene tick {} (clock {:.3}, {} slots)", self.ticks, clock, self.animators.len());
        sink.render_frame();
    }
}
