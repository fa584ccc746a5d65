//! Seeded generation of decorative element fields.
//!
//! A field is drawn once per mount: every attribute of every element comes from an
//! independent uniform draw over its configured range, in a fixed order, so a seed
//! fully determines the result.

use crate::foundation::{
    error::{MotionError, MotionResult},
    math::Rng64,
};

/// Half-open sampling range `[min, max)`. `min == max` always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttrRange {
    pub min: f64,
    pub max: f64,
}

impl AttrRange {
    pub fn new(min: f64, max: f64) -> MotionResult<Self> {
        let range = Self { min, max };
        range.validate("range")?;
        Ok(range)
    }

    /// A range that always samples `value`.
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// `Math.random() * span + offset` as written in page code.
    pub const fn span(offset: f64, span: f64) -> Self {
        Self {
            min: offset,
            max: offset + span,
        }
    }

    pub fn validate(&self, what: &str) -> MotionResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(MotionError::configuration(format!(
                "{what}: bounds must be finite (got [{}, {}))",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(MotionError::configuration(format!(
                "{what}: min must be <= max (got [{}, {}))",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, v: f64) -> bool {
        if self.min == self.max {
            return v == self.min;
        }
        self.min <= v && v < self.max
    }

    pub(crate) fn sample(&self, rng: &mut Rng64) -> f64 {
        let u = rng.next_f64_01();
        let v = self.min + (self.max - self.min) * u;
        // Rounding can land exactly on `max` for wide ranges.
        if v >= self.max && self.max > self.min {
            self.max.next_down()
        } else {
            v
        }
    }
}

/// Per-attribute ranges for one decorative field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub count: usize,
    pub x: AttrRange,
    pub y: AttrRange,
    pub size: AttrRange,
    pub duration: AttrRange,
    pub delay: AttrRange,
    /// Number of variant tags to draw from; 0 means elements carry no tag.
    #[serde(default)]
    pub variants: u32,
}

impl FieldSpec {
    /// `count` elements positioned uniformly over the full `0..100` percent area.
    pub fn scattered(count: usize) -> Self {
        Self {
            count,
            x: AttrRange::span(0.0, 100.0),
            y: AttrRange::span(0.0, 100.0),
            size: AttrRange::fixed(1.0),
            duration: AttrRange::fixed(1.0),
            delay: AttrRange::fixed(0.0),
            variants: 0,
        }
    }

    pub fn with_x(mut self, x: AttrRange) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: AttrRange) -> Self {
        self.y = y;
        self
    }

    pub fn with_size(mut self, size: AttrRange) -> Self {
        self.size = size;
        self
    }

    pub fn with_duration(mut self, duration: AttrRange) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: AttrRange) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_variants(mut self, variants: u32) -> Self {
        self.variants = variants;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.x.validate("field.x")?;
        self.y.validate("field.y")?;
        self.size.validate("field.size")?;
        self.duration.validate("field.duration")?;
        self.delay.validate("field.delay")?;
        if self.duration.min < 0.0 || self.delay.min < 0.0 || self.size.min < 0.0 {
            return Err(MotionError::configuration(
                "field size, duration and delay must be >= 0",
            ));
        }
        Ok(())
    }
}

/// One generated star, bubble, particle or rain column.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecorativeElement {
    /// Horizontal position in percent of the viewport.
    pub x: f64,
    /// Vertical position in percent of the viewport.
    pub y: f64,
    pub size: f64,
    /// Animation cycle length in seconds.
    pub duration: f64,
    /// Animation start delay in seconds.
    pub delay: f64,
    pub variant: Option<u32>,
}

/// Draw `spec.count` elements from `seed`.
///
/// Fails only on invalid configuration; a zero count yields an empty field.
pub fn generate_field(spec: &FieldSpec, seed: u64) -> MotionResult<Vec<DecorativeElement>> {
    spec.validate()?;
    let mut rng = Rng64::new(seed);
    let mut out = Vec::with_capacity(spec.count);
    for _ in 0..spec.count {
        out.push(draw_element(spec, &mut rng));
    }
    Ok(out)
}

pub(crate) fn draw_element(spec: &FieldSpec, rng: &mut Rng64) -> DecorativeElement {
    let x = spec.x.sample(rng);
    let y = spec.y.sample(rng);
    let size = spec.size.sample(rng);
    let duration = spec.duration.sample(rng);
    let delay = spec.delay.sample(rng);
    let variant = (spec.variants > 0).then(|| rng.next_index(spec.variants as usize) as u32);
    DecorativeElement {
        x,
        y,
        size,
        duration,
        delay,
        variant,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/generator.rs"]
mod tests;
