//! Decorative backdrop layers and their painters.
//!
//! Layers are plain config records. [`Backdrop`] binds them to one mount: every
//! random field is generated once at construction and reused by every frame.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::track::LoopTrack;
use crate::field::generator::{DecorativeElement, FieldSpec};
use crate::field::glyphs::{GlyphColumn, GlyphRainSpec};
use crate::field::memo::{MemoField, MemoGlyphRain};
use crate::foundation::{
    core::{Millis, Point, Rect, Rgba8, Vec2},
    error::{MotionError, MotionResult},
    math::derive_seed,
};
use crate::render::surface::Painter;
use crate::transform::pointer::PointerParallax;

fn default_opacity() -> f64 {
    1.0
}

/// One named backdrop layer. The name is what parallax bindings target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackdropLayer {
    pub name: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(flatten)]
    pub kind: LayerKind,
}

impl BackdropLayer {
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            kind,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.name.trim().is_empty() {
            return Err(MotionError::configuration("backdrop layer needs a name"));
        }
        if !(self.opacity.is_finite() && (0.0..=1.0).contains(&self.opacity)) {
            return Err(MotionError::configuration(format!(
                "layer '{}': opacity must be in [0, 1]",
                self.name
            )));
        }
        self.kind.validate().map_err(|e| match e {
            MotionError::Configuration(msg) => {
                MotionError::configuration(format!("layer '{}': {msg}", self.name))
            }
            other => other,
        })
    }
}

/// A soft glowing disc (nebula cloud, gradient blob, glow orb).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Orb {
    /// Center in viewport percent.
    pub center: Point,
    /// Diameter in pixels.
    pub size: f64,
    pub color: Rgba8,
    /// Pixel drift along x, looped.
    #[serde(default)]
    pub drift_x: Option<LoopTrack>,
    #[serde(default)]
    pub drift_y: Option<LoopTrack>,
    #[serde(default)]
    pub scale: Option<LoopTrack>,
    #[serde(default)]
    pub opacity: Option<LoopTrack>,
}

impl Orb {
    pub fn new(center: Point, size: f64, color: Rgba8) -> Self {
        Self {
            center,
            size,
            color,
            drift_x: None,
            drift_y: None,
            scale: None,
            opacity: None,
        }
    }

    fn tracks(&self) -> impl Iterator<Item = &LoopTrack> {
        [&self.drift_x, &self.drift_y, &self.scale, &self.opacity]
            .into_iter()
            .flatten()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerKind {
    /// Twinkling dots. Element `size` multiplies `radius`.
    Stars {
        field: FieldSpec,
        color: Rgba8,
        radius: f64,
        opacity: LoopTrack,
        scale: LoopTrack,
    },
    /// Pulsing dots that also shift with the pointer, element `i` by `i * gain`.
    Particles {
        field: FieldSpec,
        color: Rgba8,
        radius: f64,
        opacity: LoopTrack,
        scale: LoopTrack,
        parallax: PointerParallax,
    },
    /// Rings rising from below the viewport. Element `size` is the diameter.
    Bubbles {
        field: FieldSpec,
        fill: Rgba8,
        ring: Rgba8,
        rise: LoopTrack,
        opacity: LoopTrack,
    },
    /// Falling glyph columns. `fall` is the head position as a fraction of height.
    /// With `lane_pct`, column `i` sits at `i * lane_pct` percent instead of its drawn x.
    GlyphRain {
        rain: GlyphRainSpec,
        color: Rgba8,
        cell: f64,
        fall: LoopTrack,
        #[serde(default)]
        lane_pct: Option<f64>,
    },
    Orbs {
        orbs: Vec<Orb>,
    },
    /// A sun disc with rays fanned every `step_deg`, each ray's pulse delayed by
    /// `i * stagger_ms`.
    SunRays {
        center: Point,
        core_radius: f64,
        core_color: Rgba8,
        count: usize,
        step_deg: f64,
        length: f64,
        width: f64,
        color: Rgba8,
        opacity: LoopTrack,
        stagger_ms: u64,
    },
    /// Perspective floor occupying the bottom `height_frac` of the viewport.
    SynthFloor {
        horizontal: usize,
        vertical: usize,
        height_frac: f64,
        horizontal_color: Rgba8,
        vertical_color: Rgba8,
    },
    GridPattern {
        spacing: f64,
        color: Rgba8,
    },
    /// CRT scanlines: a colored band in the second half of every `period`.
    Scanlines {
        period: f64,
        color: Rgba8,
    },
}

fn positive(v: f64, what: &str) -> MotionResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(MotionError::configuration(format!("{what} must be > 0")))
    }
}

impl LayerKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Stars { .. } => "stars",
            Self::Particles { .. } => "particles",
            Self::Bubbles { .. } => "bubbles",
            Self::GlyphRain { .. } => "glyph_rain",
            Self::Orbs { .. } => "orbs",
            Self::SunRays { .. } => "sun_rays",
            Self::SynthFloor { .. } => "synth_floor",
            Self::GridPattern { .. } => "grid_pattern",
            Self::Scanlines { .. } => "scanlines",
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match self {
            Self::Stars {
                field,
                radius,
                opacity,
                scale,
                ..
            }
            | Self::Particles {
                field,
                radius,
                opacity,
                scale,
                ..
            } => {
                field.validate()?;
                positive(*radius, "radius")?;
                opacity.validate()?;
                scale.validate()
            }
            Self::Bubbles {
                field,
                rise,
                opacity,
                ..
            } => {
                field.validate()?;
                rise.validate()?;
                opacity.validate()
            }
            Self::GlyphRain {
                rain,
                cell,
                fall,
                lane_pct,
                ..
            } => {
                rain.validate()?;
                positive(*cell, "glyph cell size")?;
                if let Some(lane) = lane_pct {
                    positive(*lane, "rain lane width")?;
                }
                fall.validate()
            }
            Self::Orbs { orbs } => {
                for orb in orbs {
                    positive(orb.size, "orb size")?;
                    for track in orb.tracks() {
                        track.validate()?;
                    }
                }
                Ok(())
            }
            Self::SunRays {
                core_radius,
                step_deg,
                length,
                width,
                opacity,
                ..
            } => {
                positive(*core_radius, "sun core radius")?;
                positive(*length, "ray length")?;
                positive(*width, "ray width")?;
                if !step_deg.is_finite() {
                    return Err(MotionError::configuration("ray step must be finite"));
                }
                opacity.validate()
            }
            Self::SynthFloor { height_frac, .. } => {
                if !(height_frac.is_finite() && *height_frac > 0.0 && *height_frac <= 1.0) {
                    return Err(MotionError::configuration(
                        "floor height fraction must be in (0, 1]",
                    ));
                }
                Ok(())
            }
            Self::GridPattern { spacing, .. } => positive(*spacing, "grid spacing"),
            Self::Scanlines { period, .. } => positive(*period, "scanline period"),
        }
    }
}

/// Scroll-driven adjustment applied to a whole layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub offset: Vec2,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Per-frame inputs for [`Backdrop::paint`].
#[derive(Clone, Debug, Default)]
pub struct BackdropInput {
    pub time: Millis,
    /// Pointer in `[-1, 1]` on both axes.
    pub pointer: Vec2,
    /// Keyed by layer name; missing layers use the identity transform.
    pub transforms: BTreeMap<String, LayerTransform>,
}

#[derive(Debug)]
enum Elements {
    None,
    Field {
        memo: MemoField,
        elements: Rc<[DecorativeElement]>,
    },
    Rain {
        memo: MemoGlyphRain,
        columns: Rc<[GlyphColumn]>,
    },
}

#[derive(Debug)]
struct Prepared {
    layer: BackdropLayer,
    elements: Elements,
}

/// Layers bound to a mount seed, with every field generated.
#[derive(Debug)]
pub struct Backdrop {
    layers: Vec<Prepared>,
}

impl Backdrop {
    pub fn new(layers: &[BackdropLayer], seed: u64) -> MotionResult<Self> {
        let mut prepared = Vec::with_capacity(layers.len());
        for (i, layer) in layers.iter().enumerate() {
            layer.validate()?;
            let layer_seed = derive_seed(seed, &format!("{i}:{}", layer.name));
            let elements = match &layer.kind {
                LayerKind::Stars { field, .. }
                | LayerKind::Particles { field, .. }
                | LayerKind::Bubbles { field, .. } => {
                    let memo = MemoField::new(field.clone(), layer_seed)?;
                    let elements = memo.elements()?;
                    Elements::Field { memo, elements }
                }
                LayerKind::GlyphRain { rain, .. } => {
                    let memo = MemoGlyphRain::new(rain.clone(), layer_seed)?;
                    let columns = memo.columns()?;
                    Elements::Rain { memo, columns }
                }
                _ => Elements::None,
            };
            prepared.push(Prepared {
                layer: layer.clone(),
                elements,
            });
        }
        tracing::debug!(layers = prepared.len(), seed, "backdrop prepared");
        Ok(Self { layers: prepared })
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|p| p.layer.name.as_str())
    }

    /// Generated elements of a field-backed layer.
    pub fn field(&self, name: &str) -> Option<Rc<[DecorativeElement]>> {
        self.layers
            .iter()
            .find(|p| p.layer.name == name)
            .and_then(|p| match &p.elements {
                Elements::Field { elements, .. } => Some(Rc::clone(elements)),
                _ => None,
            })
    }

    /// Generated columns of a glyph rain layer.
    pub fn glyph_columns(&self, name: &str) -> Option<Rc<[GlyphColumn]>> {
        self.layers
            .iter()
            .find(|p| p.layer.name == name)
            .and_then(|p| match &p.elements {
                Elements::Rain { columns, .. } => Some(Rc::clone(columns)),
                _ => None,
            })
    }

    /// Generator runs across all layers; one per field-backed layer.
    pub fn generations(&self) -> u32 {
        self.layers
            .iter()
            .map(|p| match &p.elements {
                Elements::None => 0,
                Elements::Field { memo, .. } => memo.generations(),
                Elements::Rain { memo, .. } => memo.generations(),
            })
            .sum()
    }

    pub fn paint(&self, painter: &mut Painter<'_>, input: &BackdropInput) {
        for p in &self.layers {
            let xf = input
                .transforms
                .get(&p.layer.name)
                .copied()
                .unwrap_or_default();
            let frame = LayerFrame {
                time: input.time,
                pointer: input.pointer,
                size: painter.size(),
                xf,
            };
            let opacity = p.layer.opacity * xf.opacity;
            painter.with_opacity(opacity, |painter| paint_layer(painter, p, &frame));
        }
    }
}

struct LayerFrame {
    time: Millis,
    pointer: Vec2,
    size: Vec2,
    xf: LayerTransform,
}

impl LayerFrame {
    fn percent(&self, x_pct: f64, y_pct: f64) -> Point {
        Point::new(x_pct / 100.0 * self.size.x, y_pct / 100.0 * self.size.y)
    }

    /// Apply the layer transform (scale about the viewport center, then offset).
    fn place(&self, p: Point) -> Point {
        let c = (self.size / 2.0).to_point();
        c + (p - c) * self.xf.scale + self.xf.offset
    }

    fn len(&self, v: f64) -> f64 {
        v * self.xf.scale
    }
}

fn paint_layer(painter: &mut Painter<'_>, p: &Prepared, f: &LayerFrame) {
    let t = f.time;
    match (&p.layer.kind, &p.elements) {
        (
            LayerKind::Stars {
                color,
                radius,
                opacity,
                scale,
                ..
            },
            Elements::Field { elements, .. },
        ) => {
            for el in elements.iter() {
                let a = opacity.sample_retimed(t, el.duration, el.delay);
                let s = scale.sample_retimed(t, el.duration, el.delay);
                let center = f.place(f.percent(el.x, el.y));
                painter.fill_circle(center, f.len(radius * el.size * s), color.fade(a));
            }
        }
        (
            LayerKind::Particles {
                color,
                radius,
                opacity,
                scale,
                parallax,
                ..
            },
            Elements::Field { elements, .. },
        ) => {
            for (i, el) in elements.iter().enumerate() {
                let a = opacity.sample_retimed(t, el.duration, el.delay);
                let s = scale.sample_retimed(t, el.duration, el.delay);
                let center = f.place(f.percent(el.x, el.y)) + parallax.offset(f.pointer, i);
                painter.fill_circle(center, f.len(radius * el.size * s), color.fade(a));
            }
        }
        (
            LayerKind::Bubbles {
                fill,
                ring,
                rise,
                opacity,
                ..
            },
            Elements::Field { elements, .. },
        ) => {
            for el in elements.iter() {
                let r = el.size / 2.0;
                // Parked 100px below the bottom edge, then lifted by the rise track.
                let base = Point::new(el.x / 100.0 * f.size.x, f.size.y + 100.0 - r);
                let dy = rise.sample_retimed(t, el.duration, el.delay);
                let center = f.place(base + Vec2::new(0.0, dy));
                let a = opacity.sample_retimed(t, el.duration, el.delay);
                painter.with_opacity(a, |painter| {
                    painter.fill_circle(center, f.len(r), *fill);
                    let ring_path =
                        kurbo::Shape::to_path(&kurbo::Circle::new(center, f.len(r)), 0.1);
                    painter.stroke_path(&ring_path, 2.0, *ring);
                });
            }
        }
        (
            LayerKind::GlyphRain {
                color,
                cell,
                fall,
                lane_pct,
                ..
            },
            Elements::Rain { columns, .. },
        ) => {
            for (i, col) in columns.iter().enumerate() {
                let el = &col.element;
                let head = fall.sample_retimed(t, el.duration, el.delay) * f.size.y;
                let x_pct = lane_pct.map_or(el.x, |lane| i as f64 * lane);
                let x = x_pct / 100.0 * f.size.x;
                for (j, ch) in col.glyphs.chars().enumerate() {
                    let y = head + j as f64 * cell;
                    if y > f.size.y {
                        break;
                    }
                    paint_glyph(painter, f.place(Point::new(x, y)), f.len(*cell), ch, *color);
                }
            }
        }
        (LayerKind::Orbs { orbs }, _) => {
            for orb in orbs {
                let drift = Vec2::new(
                    orb.drift_x.as_ref().map_or(0.0, |tr| tr.sample(t)),
                    orb.drift_y.as_ref().map_or(0.0, |tr| tr.sample(t)),
                );
                let s = orb.scale.as_ref().map_or(1.0, |tr| tr.sample(t));
                let a = orb.opacity.as_ref().map_or(1.0, |tr| tr.sample(t));
                let center = f.place(f.percent(orb.center.x, orb.center.y) + drift);
                paint_glow(painter, center, f.len(orb.size / 2.0 * s), orb.color.fade(a));
            }
        }
        (
            LayerKind::SunRays {
                center,
                core_radius,
                core_color,
                count,
                step_deg,
                length,
                width,
                color,
                opacity,
                stagger_ms,
            },
            _,
        ) => {
            let c = f.place(f.percent(center.x, center.y));
            let duration_s = opacity.duration_ms as f64 / 1000.0;
            for i in 0..*count {
                let theta = (i as f64 * step_deg).to_radians();
                // Rays hang downward from the center before rotation.
                let dir = Vec2::new(-theta.sin(), theta.cos());
                let delay_s = (opacity.delay_ms + i as u64 * stagger_ms) as f64 / 1000.0;
                let a = opacity.sample_retimed(t, duration_s, delay_s);
                painter.stroke_line(c, c + dir * f.len(*length), f.len(*width), color.fade(a));
            }
            paint_glow(painter, c, f.len(core_radius * 1.5), core_color.fade(0.5));
            painter.fill_circle(c, f.len(*core_radius), *core_color);
        }
        (
            LayerKind::SynthFloor {
                horizontal,
                vertical,
                height_frac,
                horizontal_color,
                vertical_color,
            },
            _,
        ) => {
            let bottom = f.size.y;
            let depth = f.size.y * height_frac;
            let horizon = bottom - depth;
            for i in 0..*horizontal {
                let z = i as f64 / (*horizontal).max(1) as f64;
                // Lines bunch up toward the horizon.
                let y = bottom - depth * (1.0 - 1.0 / (1.0 + 2.0 * z)) * 1.5;
                let a = (1.0 - i as f64 * 0.03).max(0.0);
                painter.stroke_line(
                    f.place(Point::new(0.0, y)),
                    f.place(Point::new(f.size.x, y)),
                    1.0,
                    horizontal_color.fade(a),
                );
            }
            let mid = f.size.x / 2.0;
            let half = (*vertical / 2) as f64;
            for i in 0..*vertical {
                let x_bottom = ((i as f64 - half) * 5.0 + 50.0) / 100.0 * f.size.x;
                let x_top = mid + (x_bottom - mid) * 0.3;
                painter.stroke_line(
                    f.place(Point::new(x_top, horizon)),
                    f.place(Point::new(x_bottom, bottom)),
                    1.0,
                    *vertical_color,
                );
            }
        }
        (LayerKind::GridPattern { spacing, color }, _) => {
            let mut x = 0.0;
            while x < f.size.x {
                painter.fill_rect(Rect::new(x, 0.0, x + 1.0, f.size.y), *color);
                x += spacing;
            }
            let mut y = 0.0;
            while y < f.size.y {
                painter.fill_rect(Rect::new(0.0, y, f.size.x, y + 1.0), *color);
                y += spacing;
            }
        }
        (LayerKind::Scanlines { period, color }, _) => {
            let band = period / 2.0;
            let mut y = band;
            while y < f.size.y {
                painter.fill_rect(Rect::new(0.0, y, f.size.x, (y + band).min(f.size.y)), *color);
                y += period;
            }
        }
        (kind, _) => {
            tracing::warn!(kind = kind.kind_name(), "layer has no generated elements");
        }
    }
}

/// Concentric discs approximating a blurred glow.
fn paint_glow(painter: &mut Painter<'_>, center: Point, radius: f64, color: Rgba8) {
    const RINGS: u32 = 4;
    let step = color.fade(1.0 / f64::from(RINGS));
    for k in 0..RINGS {
        let r = radius * (1.0 - f64::from(k) * 0.2);
        painter.fill_circle(center, r, step);
    }
}

/// Glyphs are drawn as marks, not text: bars for `1`, rings for `0`, shaded
/// blocks for everything else.
fn paint_glyph(painter: &mut Painter<'_>, at: Point, cell: f64, ch: char, color: Rgba8) {
    let w = cell * 0.6;
    let h = cell * 0.8;
    match ch {
        '1' => painter.fill_rect(
            Rect::new(at.x + w * 0.4, at.y, at.x + w * 0.6, at.y + h),
            color,
        ),
        '0' => {
            let radii = Vec2::new(w / 2.0, h / 2.0);
            let ring = kurbo::Shape::to_path(&kurbo::Ellipse::new(at + radii, radii, 0.0), 0.1);
            painter.stroke_path(&ring, (cell * 0.1).max(1.0), color);
        }
        other => {
            let shade = 0.4 + f64::from(u32::from(other) % 7) / 10.0;
            painter.fill_rect(Rect::new(at.x, at.y, at.x + w, at.y + h), color.fade(shade));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backdrop.rs"]
mod tests;
