use crate::foundation::core::{Point, Vec2, Viewport};

/// Latest pointer position in viewport pixels. No history is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    position: Option<Point>,
}

impl PointerState {
    pub fn update(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Pixel position, or `fallback` before the first move.
    pub fn position_or(&self, fallback: Point) -> Point {
        self.position.unwrap_or(fallback)
    }

    /// Normalized to `[-1, 1]` on both axes; the viewport center is the origin.
    /// Reports zero before the first move.
    pub fn normalized(&self, viewport: Viewport) -> Vec2 {
        match self.position {
            Some(p) => normalize_pointer(p, viewport),
            None => Vec2::ZERO,
        }
    }
}

/// A zero-length viewport axis (or a non-finite coordinate) reads as centered.
pub fn normalize_pointer(p: Point, viewport: Viewport) -> Vec2 {
    let size = viewport.size();
    Vec2::new(normalize_axis(p.x, size.x), normalize_axis(p.y, size.y))
}

fn normalize_axis(at: f64, extent: f64) -> f64 {
    let v = (at / extent - 0.5) * 2.0;
    if extent > 0.0 && v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Per-index pointer parallax: element `i` shifts by `pointer * i * gain` pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerParallax {
    pub gain: f64,
}

impl PointerParallax {
    pub fn offset(&self, normalized: Vec2, index: usize) -> Vec2 {
        normalized * (index as f64 * self.gain)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/pointer.rs"]
mod tests;
