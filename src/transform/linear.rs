//! Linear remaps from an input signal domain to an output range.

use crate::foundation::{
    core::Vec2,
    error::{MotionError, MotionResult},
};

/// What happens to inputs outside the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    #[default]
    Clamp,
    Extend,
}

/// Clamped linear interpolation of `input` from `domain` onto `range`.
///
/// A degenerate domain maps everything below it to `range[0]` and the rest to `range[1]`.
#[inline]
pub fn map_signal(input: f64, domain: [f64; 2], range: [f64; 2]) -> f64 {
    map_signal_with(input, domain, range, Extrapolate::Clamp)
}

pub fn map_signal_with(
    input: f64,
    domain: [f64; 2],
    range: [f64; 2],
    extrapolate: Extrapolate,
) -> f64 {
    let [d0, d1] = domain;
    let [r0, r1] = range;
    if d0 == d1 {
        return if input < d0 { r0 } else { r1 };
    }
    let mut t = (input - d0) / (d1 - d0);
    if extrapolate == Extrapolate::Clamp {
        t = t.clamp(0.0, 1.0);
    }
    r0 + (r1 - r0) * t
}

/// Configured two-point remap (`useTransform(progress, [0, 1], [0, 200])`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearMap {
    pub domain: [f64; 2],
    pub range: [f64; 2],
    #[serde(default)]
    pub extrapolate: Extrapolate,
}

impl LinearMap {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> MotionResult<Self> {
        let map = Self {
            domain,
            range,
            extrapolate: Extrapolate::Clamp,
        };
        map.validate()?;
        Ok(map)
    }

    pub fn extended(mut self) -> Self {
        self.extrapolate = Extrapolate::Extend;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        let all = [self.domain[0], self.domain[1], self.range[0], self.range[1]];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(MotionError::configuration("LinearMap bounds must be finite"));
        }
        if self.domain[0] == self.domain[1] {
            return Err(MotionError::configuration(
                "LinearMap domain must not be empty",
            ));
        }
        Ok(())
    }

    pub fn map(&self, input: f64) -> f64 {
        map_signal_with(input, self.domain, self.range, self.extrapolate)
    }

    /// Remap both axes independently.
    pub fn map_vec2(&self, input: Vec2) -> Vec2 {
        Vec2::new(self.map(input.x), self.map(input.y))
    }
}

/// Multi-stop remap (`[0.15, 0.25, 0.35] -> [0, 1, 0]`), clamped at both ends.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PiecewiseMapRepr", into = "PiecewiseMapRepr")]
pub struct PiecewiseMap {
    stops: Vec<f64>,
    outputs: Vec<f64>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PiecewiseMapRepr {
    stops: Vec<f64>,
    outputs: Vec<f64>,
}

impl TryFrom<PiecewiseMapRepr> for PiecewiseMap {
    type Error = MotionError;

    fn try_from(r: PiecewiseMapRepr) -> MotionResult<Self> {
        Self::new(r.stops, r.outputs)
    }
}

impl From<PiecewiseMap> for PiecewiseMapRepr {
    fn from(m: PiecewiseMap) -> Self {
        Self {
            stops: m.stops,
            outputs: m.outputs,
        }
    }
}

impl PiecewiseMap {
    pub fn new(stops: Vec<f64>, outputs: Vec<f64>) -> MotionResult<Self> {
        if stops.len() < 2 {
            return Err(MotionError::configuration(
                "PiecewiseMap needs at least two stops",
            ));
        }
        if stops.len() != outputs.len() {
            return Err(MotionError::configuration(format!(
                "PiecewiseMap has {} stops but {} outputs",
                stops.len(),
                outputs.len()
            )));
        }
        if stops.iter().chain(outputs.iter()).any(|v| !v.is_finite()) {
            return Err(MotionError::configuration(
                "PiecewiseMap values must be finite",
            ));
        }
        if !stops.windows(2).all(|w| w[0] < w[1]) {
            return Err(MotionError::configuration(
                "PiecewiseMap stops must be strictly increasing",
            ));
        }
        Ok(Self { stops, outputs })
    }

    pub fn linear(domain: [f64; 2], range: [f64; 2]) -> MotionResult<Self> {
        Self::new(domain.to_vec(), range.to_vec())
    }

    pub fn stops(&self) -> &[f64] {
        &self.stops
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn map(&self, input: f64) -> f64 {
        let idx = self.stops.partition_point(|s| *s <= input);
        if idx == 0 {
            return self.outputs[0];
        }
        if idx >= self.stops.len() {
            return self.outputs[self.outputs.len() - 1];
        }
        map_signal(
            input,
            [self.stops[idx - 1], self.stops[idx]],
            [self.outputs[idx - 1], self.outputs[idx]],
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/linear.rs"]
mod tests;
