use crate::foundation::{
    core::{Millis, Point, Vec2},
    error::{MotionError, MotionResult},
};

/// Damped spring parameters (unit mass).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(MotionError::configuration("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(MotionError::configuration("spring damping must be >= 0"));
        }
        Ok(())
    }
}

const SUBSTEP_S: f64 = 0.001;
const REST_DELTA: f64 = 0.01;

/// Spring-smoothed cursor that chases the latest pointer target.
///
/// `hotspot` is subtracted from the target so a `2 * hotspot` sized ring is centered
/// on the pointer.
#[derive(Clone, Copy, Debug)]
pub struct CursorSpring {
    config: SpringConfig,
    hotspot: Vec2,
    position: Point,
    velocity: Vec2,
    target: Point,
}

impl CursorSpring {
    pub fn new(config: SpringConfig, hotspot: Vec2, start: Point) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            hotspot,
            position: start,
            velocity: Vec2::ZERO,
            target: start,
        })
    }

    /// Non-finite pointers are ignored; the previous target stays.
    pub fn set_pointer(&mut self, pointer: Point) {
        let target = pointer - self.hotspot;
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.position).hypot() < REST_DELTA && self.velocity.hypot() < REST_DELTA
    }

    /// Advance the simulation by `dt` using fixed semi-implicit Euler substeps.
    pub fn step(&mut self, dt: Millis) {
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = Vec2::ZERO;
            return;
        }
        let steps = ((dt.as_secs_f64() / SUBSTEP_S).round() as u64).max(1);
        let h = dt.as_secs_f64() / steps as f64;
        for _ in 0..steps {
            let displacement = self.position - self.target;
            let accel = displacement * -self.config.stiffness - self.velocity * self.config.damping;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/spring.rs"]
mod tests;
