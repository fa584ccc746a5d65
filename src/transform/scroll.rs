use crate::foundation::error::{MotionError, MotionResult};
use crate::transform::linear::PiecewiseMap;

/// Scroll position of a tracked container, normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// Clamps into `[0, 1]`; NaN reads as the start.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Progress of a container scrolled by `scroll_top` pixels, tracked from
    /// "start start" to "end end". Containers that fit the viewport report 0.
    pub fn from_container(scroll_top: f64, content_height: f64, viewport_height: f64) -> Self {
        let scrollable = content_height - viewport_height;
        if scrollable.is_nan() || scrollable <= 0.0 {
            return Self::START;
        }
        Self::new(scroll_top / scrollable)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Which visual property a binding drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformProperty {
    TranslateX,
    TranslateY,
    Scale,
    Opacity,
}

/// A named layer property driven by scroll progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxBinding {
    pub target: String,
    pub property: TransformProperty,
    pub map: PiecewiseMap,
}

impl ParallaxBinding {
    pub fn new(
        target: impl Into<String>,
        property: TransformProperty,
        stops: Vec<f64>,
        outputs: Vec<f64>,
    ) -> MotionResult<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(MotionError::configuration(
                "parallax binding target must not be empty",
            ));
        }
        Ok(Self {
            target,
            property,
            map: PiecewiseMap::new(stops, outputs)?,
        })
    }

    pub fn value(&self, progress: ScrollProgress) -> f64 {
        self.map.map(progress.value())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/scroll.rs"]
mod tests;
