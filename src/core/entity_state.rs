use std::sync::Arc;
use bevy::math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::core::path::Path;
use crate::core::transform::PathTransform;

// After wrapping an overshoot, a remainder this close to 1.0 is rounding noise and becomes 0.
pub const WRAP_EPSILON: f32 = 1e-5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// `sin(clock * frequency) * amplitude`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Oscillation {
    pub fn value(&self, clock: f32) -> f32 {
        (clock * self.frequency).sin() * self.amplitude
    }
}

/// Folds progress into `[0, 1)`. Overshoot past 1 and negative progress (a throttle deeper
/// than the base speed) both wrap around the loop.
pub fn wrap_progress(progress: f32) -> f32 {
    if !progress.is_finite() {
        return 0.0;
    }
    if (0.0..1.0).contains(&progress) {
        return progress;
    }

    let wrapped = progress.rem_euclid(1.0);
    let limit = if progress >= 1.0 { 1.0 - WRAP_EPSILON } else { 1.0 };
    if wrapped >= limit {
        0.0
    } else {
        wrapped
    }
}

/// An object looping along a shared [`Path`].
#[derive(Debug, Clone)]
pub struct MovingEntity {
    pub path: Arc<Path>,
    pub progress: f32,
    pub speed: f32,
    pub jitter: f32,
    /// Scales `speed` by `1 + throttle(clock)`.
    pub throttle: Option<Oscillation>,
}

impl MovingEntity {
    pub fn new(path: Arc<Path>, speed: f32) -> Self {
        MovingEntity {
            path,
            progress: 0.0,
            speed,
            jitter: 0.0,
            throttle: None,
        }
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = wrap_progress(progress);
        self
    }

    pub fn with_throttle(mut self, throttle: Oscillation) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Moves `frames` reference ticks forward and returns the resulting placement.
    pub fn advance<R: Rng + ?Sized>(&mut self, clock: f32, frames: f32, rng: &mut R) -> PathTransform {
        let surge = self.throttle.map_or(0.0, |t| t.value(clock));
        let noise = if self.jitter > 0.0 { rng.gen::<f32>() * self.jitter } else { 0.0 };
        let increment = self.speed * (1.0 + surge) + noise;

        self.progress = wrap_progress(self.progress + increment * frames);
        self.transform()
    }

    pub fn transform(&self) -> PathTransform {
        PathTransform::from_tangent(
            self.path.point_at(self.progress),
            self.path.tangent_at(self.progress),
        )
    }
}

/// Sets one Euler angle outright every tick instead of accumulating it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub axis: Axis,
    pub oscillation: Oscillation,
}

/// Free rotation that never wraps; only the sine and cosine of the angles matter downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    pub angles: Vec3,
    /// Radians per tick, XYZ.
    pub rate: Vec3,
    /// Added to every axis whose base rate is non-zero.
    pub rate_wobble: Option<Oscillation>,
    pub sway: Option<Sway>,
}

impl Spinner {
    pub fn new(rate: Vec3) -> Self {
        Spinner {
            angles: Vec3::ZERO,
            rate,
            rate_wobble: None,
            sway: None,
        }
    }

    pub fn advance(&mut self, clock: f32, frames: f32) -> Vec3 {
        let wobble = self.rate_wobble.map_or(0.0, |w| w.value(clock));
        let rate = Vec3::select(self.rate.cmpne(Vec3::ZERO), self.rate + wobble, Vec3::ZERO);
        self.angles += rate * frames;

        if let Some(sway) = self.sway {
            sway.axis.set(&mut self.angles, sway.oscillation.value(clock));
        }
        self.angles
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bob {
    pub base: Vec3,
    pub axis: Axis,
    pub oscillation: Oscillation,
}

impl Bob {
    pub fn position(&self, clock: f32) -> Vec3 {
        self.base + self.axis.unit() * self.oscillation.value(clock)
    }
}

/// Particles drifting along one axis, each wrapping into `[-bound, bound)` on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub axis: Axis,
    pub step: f32,
    pub bound: f32,
}

impl ParticleField {
    pub fn advance(&mut self, frames: f32) -> &[Vec3] {
        let (axis, step, bound) = (self.axis, self.step, self.bound);
        for position in self.positions.iter_mut() {
            let moved = axis.get(*position) + step * frames;
            axis.set(position, wrap_coordinate(moved, bound));
        }
        &self.positions
    }
}

fn wrap_coordinate(value: f32, bound: f32) -> f32 {
    if bound <= 0.0 || (-bound..bound).contains(&value) {
        return value;
    }
    (value + bound).rem_euclid(2.0 * bound) - bound
}

/// Wall-clock loop along one axis: `(elapsed * speed) mod span - lead_in`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conveyor {
    pub base: Vec3,
    pub axis: Axis,
    pub speed: f32,
    pub span: f32,
    pub lead_in: f32,
}

impl Conveyor {
    pub fn position(&self, elapsed_seconds: f32) -> Vec3 {
        let travelled = if self.span > 0.0 {
            (elapsed_seconds * self.speed).rem_euclid(self.span)
        } else {
            0.0
        };
        self.base + self.axis.unit() * (travelled - self.lead_in)
    }
}
