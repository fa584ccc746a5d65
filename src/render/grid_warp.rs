//! Pointer-reactive grid: lines bend away from the pointer and intersections grow dots.

use crate::foundation::{
    core::{BezPath, Point, Rgba8, Vec2},
    error::{MotionError, MotionResult},
};
use crate::render::surface::Painter;
use crate::transform::proximity::Falloff;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridWarp {
    /// Distance between grid lines in pixels.
    pub spacing: f64,
    /// Distance between samples along each line.
    pub sample_step: f64,
    /// Perpendicular line offset near the pointer.
    pub line: Falloff,
    /// Intersection dot radius near the pointer.
    pub dot: Falloff,
    pub line_width: f64,
    pub stroke: Rgba8,
    pub dot_color: Rgba8,
}

impl Default for GridWarp {
    fn default() -> Self {
        Self {
            spacing: 40.0,
            sample_step: 5.0,
            line: Falloff {
                radius: 100.0,
                max_effect: 20.0,
                exponent: 1.0,
            },
            dot: Falloff {
                radius: 100.0,
                max_effect: 4.0,
                exponent: 1.0,
            },
            line_width: 1.0,
            stroke: Rgba8::with_alpha(139, 92, 246, 0.2),
            dot_color: Rgba8::with_alpha(139, 92, 246, 0.6),
        }
    }
}

impl GridWarp {
    /// Pointer position assumed until the first pointer move.
    pub const REST_POINTER: Point = Point::ORIGIN;

    pub fn validate(&self) -> MotionResult<()> {
        if !(self.spacing.is_finite() && self.spacing >= 1.0) {
            return Err(MotionError::configuration("grid spacing must be >= 1px"));
        }
        if !(self.sample_step.is_finite() && self.sample_step >= 0.5) {
            return Err(MotionError::configuration(
                "grid sample step must be >= 0.5px",
            ));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(MotionError::configuration("grid line width must be > 0"));
        }
        self.line.validate()?;
        self.dot.validate()?;
        Ok(())
    }

    fn offset_at(&self, pointer: Option<Point>, at: Point) -> f64 {
        pointer.map_or(0.0, |p| self.line.between(p, at))
    }

    /// Line positions `0, spacing, 2*spacing, ...` strictly below `extent`.
    fn lines(&self, extent: f64) -> impl Iterator<Item = f64> + '_ {
        let n = (extent / self.spacing).ceil().max(0.0) as usize;
        (0..n).map(move |i| i as f64 * self.spacing)
    }

    /// Samples `0, step, ...` up to and including `extent`.
    fn samples(&self, extent: f64) -> impl Iterator<Item = f64> + '_ {
        let n = (extent / self.sample_step).floor().max(0.0) as usize;
        (0..=n).map(move |i| i as f64 * self.sample_step)
    }

    /// Vertical line at `x`, bent right near the pointer.
    pub fn vertical_line(&self, x: f64, height: f64, pointer: Option<Point>) -> BezPath {
        let mut path = BezPath::new();
        for (i, y) in self.samples(height).enumerate() {
            let p = Point::new(x + self.offset_at(pointer, Point::new(x, y)), y);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }

    /// Horizontal line at `y`, bent down near the pointer.
    pub fn horizontal_line(&self, y: f64, width: f64, pointer: Option<Point>) -> BezPath {
        let mut path = BezPath::new();
        for (i, x) in self.samples(width).enumerate() {
            let p = Point::new(x, y + self.offset_at(pointer, Point::new(x, y)));
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }

    /// Every grid line for a surface of `size`, verticals first.
    pub fn line_paths(&self, size: Vec2, pointer: Option<Point>) -> Vec<BezPath> {
        let mut out: Vec<BezPath> = self
            .lines(size.x)
            .map(|x| self.vertical_line(x, size.y, pointer))
            .collect();
        out.extend(
            self.lines(size.y)
                .map(|y| self.horizontal_line(y, size.x, pointer)),
        );
        out
    }

    /// Intersections inside the dot radius, with their dot radius.
    pub fn dots(&self, size: Vec2, pointer: Option<Point>) -> Vec<(Point, f64)> {
        let Some(pointer) = pointer else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for x in self.lines(size.x) {
            for y in self.lines(size.y) {
                let at = Point::new(x, y);
                let r = self.dot.between(pointer, at);
                if r > 0.0 {
                    out.push((at, r));
                }
            }
        }
        out
    }

    pub fn draw(&self, painter: &mut Painter<'_>, pointer: Option<Point>) {
        let size = painter.size();
        for path in self.line_paths(size, pointer) {
            painter.stroke_path(&path, self.line_width, self.stroke);
        }
        for (center, r) in self.dots(size, pointer) {
            painter.fill_circle(center, r, self.dot_color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid_warp.rs"]
mod tests;
