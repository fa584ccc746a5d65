//! CPU drawing surface backed by a `vello_cpu` pixmap.

use kurbo::{PathEl, Shape};

use crate::foundation::{
    core::{BezPath, Point, Rect, Rgba8, Vec2, Viewport},
    error::{MotionError, MotionResult},
};

/// Read-back of a surface's pixels, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl Frame {
    /// Straight-alpha copy, as expected by PNG encoders.
    pub fn to_straight(&self) -> Self {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Count of pixels whose alpha is non-zero.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

fn surface_dims(viewport: Viewport) -> MotionResult<(u16, u16)> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(MotionError::resource_unavailable(
            "drawing surface needs a non-empty viewport",
        ));
    }
    let w: u16 = viewport.width.try_into().map_err(|_| {
        MotionError::resource_unavailable(format!("surface width {} exceeds u16", viewport.width))
    })?;
    let h: u16 = viewport.height.try_into().map_err(|_| {
        MotionError::resource_unavailable(format!(
            "surface height {} exceeds u16",
            viewport.height
        ))
    })?;
    Ok((w, h))
}

/// Owned pixmap sized to the viewport.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl CpuSurface {
    pub fn new(viewport: Viewport) -> MotionResult<Self> {
        let (width, height) = surface_dims(viewport)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Match the surface to `viewport`. Contents are discarded when the size changes.
    pub fn resize(&mut self, viewport: Viewport) -> MotionResult<()> {
        let (width, height) = surface_dims(viewport)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        Ok(())
    }

    pub fn clear(&mut self, color: Rgba8) {
        let premul = color.to_premul();
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Clear to `background`, then run `f` against a fresh painter and rasterize.
    pub fn draw(&mut self, background: Rgba8, f: impl FnOnce(&mut Painter<'_>)) {
        self.clear(Rgba8::new(0, 0, 0, 0));
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let size = Vec2::new(f64::from(self.width), f64::from(self.height));
        {
            let mut painter = Painter {
                ctx: &mut ctx,
                size,
            };
            if background.a != 0 {
                painter.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), background);
            }
            f(&mut painter);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    pub fn frame(&self) -> Frame {
        Frame {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

/// Acquires drawing surfaces for canvas effects.
pub trait SurfaceSource {
    fn acquire(&mut self, viewport: Viewport) -> MotionResult<CpuSurface>;
}

/// Allocates a fresh [`CpuSurface`] per acquisition.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSurfaceSource;

impl SurfaceSource for CpuSurfaceSource {
    fn acquire(&mut self, viewport: Viewport) -> MotionResult<CpuSurface> {
        CpuSurface::new(viewport)
    }
}

/// Immediate-mode drawing calls for one frame.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    size: Vec2,
}

impl Painter<'_> {
    /// Surface size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if color.a == 0 || radius.is_nan() || radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(center, radius).to_path(0.1);
        self.fill_path(&path, color);
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.set_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        if color.a == 0 || width.is_nan() || width <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, width, color);
    }

    /// Draw `f` through a group opacity layer.
    pub fn with_opacity(&mut self, opacity: f64, f: impl FnOnce(&mut Self)) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        if opacity >= 1.0 {
            f(self);
            return;
        }
        self.ctx.push_opacity_layer(opacity as f32);
        f(self);
        self.ctx.pop_layer();
    }

    fn set_color(&mut self, c: Rgba8) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
