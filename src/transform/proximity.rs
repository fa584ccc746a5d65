//! Distance falloff around a pointer: grid warp, magnetic cursor, intersection dots.

use crate::foundation::{
    core::Point,
    error::{MotionError, MotionResult},
};

/// `max_effect * (1 - d / radius)^exponent` inside `radius`, zero outside.
///
/// Radii and exponents differ per page and stay per-page configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Falloff {
    pub radius: f64,
    pub max_effect: f64,
    #[serde(default = "default_exponent")]
    pub exponent: f64,
}

fn default_exponent() -> f64 {
    1.0
}

impl Falloff {
    pub fn new(radius: f64, max_effect: f64) -> MotionResult<Self> {
        let f = Self {
            radius,
            max_effect,
            exponent: 1.0,
        };
        f.validate()?;
        Ok(f)
    }

    pub fn with_exponent(mut self, exponent: f64) -> MotionResult<Self> {
        self.exponent = exponent;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MotionError::configuration(
                "falloff radius must be finite and > 0",
            ));
        }
        if !self.max_effect.is_finite() {
            return Err(MotionError::configuration(
                "falloff max effect must be finite",
            ));
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(MotionError::configuration(
                "falloff exponent must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, distance: f64) -> f64 {
        proximity_falloff(distance, self.radius, self.max_effect, self.exponent)
    }

    pub fn between(&self, pointer: Point, reference: Point) -> f64 {
        self.sample(pointer.distance(reference))
    }
}

#[inline]
pub fn proximity_falloff(distance: f64, radius: f64, max_effect: f64, exponent: f64) -> f64 {
    let d = distance.max(0.0);
    if d >= radius {
        return 0.0;
    }
    let k = 1.0 - d / radius;
    if exponent == 1.0 {
        max_effect * k
    } else {
        max_effect * k.powf(exponent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/proximity.rs"]
mod tests;
