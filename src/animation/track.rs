//! Repeating keyframe tracks (`animate={{ opacity: [0.2, 1, 0.2] }}` with
//! `repeat: Infinity`), sampled at an absolute time.

use crate::animation::ease::Ease;
use crate::foundation::{
    core::Millis,
    error::{MotionError, MotionResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Play once and hold the last value.
    Once,
    #[default]
    Loop,
}

/// Equally spaced keyframe values over `duration_ms`, starting after `delay_ms`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopTrack {
    pub values: Vec<f64>,
    pub duration_ms: u64,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub repeat: Repeat,
}

impl LoopTrack {
    pub fn new(values: Vec<f64>, duration_ms: u64) -> MotionResult<Self> {
        let track = Self {
            values,
            duration_ms,
            delay_ms: 0,
            ease: Ease::Linear,
            repeat: Repeat::Loop,
        };
        track.validate()?;
        Ok(track)
    }

    /// Build from per-element timing drawn in seconds.
    pub fn from_secs(values: Vec<f64>, duration_s: f64, delay_s: f64) -> MotionResult<Self> {
        let mut track = Self::new(values, Millis::from_secs_f64(duration_s).0.max(1))?;
        track.delay_ms = Millis::from_secs_f64(delay_s).0;
        Ok(track)
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.values.is_empty() {
            return Err(MotionError::configuration(
                "LoopTrack needs at least one value",
            ));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(MotionError::configuration(
                "LoopTrack values must be finite",
            ));
        }
        if self.duration_ms == 0 {
            return Err(MotionError::configuration(
                "LoopTrack duration must be > 0",
            ));
        }
        Ok(())
    }

    /// Cycle progress in `[0, 1)` (or exactly 1 once a non-looping track ends).
    pub fn progress(&self, t: Millis) -> f64 {
        cycle_progress(t, self.duration_ms, self.delay_ms, self.repeat)
    }

    pub fn sample(&self, t: Millis) -> f64 {
        self.sample_progress(self.progress(t))
    }

    /// Sample with timing drawn per element (seconds), keeping this track's values,
    /// easing and repeat mode.
    pub fn sample_retimed(&self, t: Millis, duration_s: f64, delay_s: f64) -> f64 {
        let duration_ms = Millis::from_secs_f64(duration_s).0.max(1);
        let delay_ms = Millis::from_secs_f64(delay_s).0;
        self.sample_progress(cycle_progress(t, duration_ms, delay_ms, self.repeat))
    }

    pub fn sample_progress(&self, p: f64) -> f64 {
        let n = self.values.len();
        if n == 1 {
            return self.values[0];
        }
        let segments = (n - 1) as f64;
        let pos = p.clamp(0.0, 1.0) * segments;
        let idx = (pos.floor() as usize).min(n - 2);
        let local = self.ease.apply(pos - idx as f64);
        let a = self.values[idx];
        let b = self.values[idx + 1];
        a + (b - a) * local
    }
}

fn cycle_progress(t: Millis, duration_ms: u64, delay_ms: u64, repeat: Repeat) -> f64 {
    if t.0 < delay_ms || duration_ms == 0 {
        return 0.0;
    }
    let local = t.0 - delay_ms;
    match repeat {
        Repeat::Loop => (local % duration_ms) as f64 / duration_ms as f64,
        Repeat::Once => (local as f64 / duration_ms as f64).min(1.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
