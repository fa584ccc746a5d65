//! folio-motion is the motion engine behind a set of themed portfolio pages.
//!
//! It has three cores, plus the plumbing that drives them:
//!
//! - Seeded decorative fields ([`FieldSpec`], [`GlyphRainSpec`]), generated once per mount
//! - Pointer and scroll transform mapping ([`map_signal`], [`Falloff`], [`ParallaxBinding`])
//! - The boot-sequence typing effect ([`RevealState`], [`BootSequencer`])
//!
//! Everything runs on a single-threaded [`Runtime`] with a manual clock. A [`PageView`]
//! mounts one [`PageConfig`] onto a runtime and renders its backdrop to a CPU surface.
#![forbid(unsafe_code)]

pub mod animation;
pub mod field;
pub mod foundation;
pub mod pages;
pub mod render;
pub mod reveal;
pub mod runtime;
pub mod transform;

pub use crate::foundation::core::{BezPath, Circle, Millis, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::{ease::Ease, track::LoopTrack};
pub use crate::field::{
    generator::{AttrRange, DecorativeElement, FieldSpec, generate_field},
    glyphs::{GlyphColumn, GlyphRainSpec, GlyphSource, generate_glyph_columns},
    memo::{MemoField, MemoGlyphRain},
};
pub use crate::pages::{
    config::{PageConfig, PageId},
    presets::{GalleryEntry, gallery, preset},
    view::{PageView, render_still},
};
pub use crate::render::{
    backdrop::{Backdrop, BackdropLayer, LayerKind},
    canvas::{CanvasEffect, CanvasScene},
    grid_warp::GridWarp,
    surface::{CpuSurface, CpuSurfaceSource, Frame, SurfaceSource},
};
pub use crate::reveal::{
    sequencer::{BootSequencer, BootTiming},
    state::{BootScript, RevealEvent, RevealState},
};
pub use crate::runtime::{
    event_loop::{FRAME_INTERVAL, Runtime},
    handle::{ListenerGuard, TaskHandle},
    scope::MountScope,
    signal::{Signal, SignalKind},
};
pub use crate::transform::{
    linear::{LinearMap, PiecewiseMap, map_signal},
    pointer::{PointerParallax, normalize_pointer},
    proximity::{Falloff, proximity_falloff},
    scroll::{ParallaxBinding, ScrollProgress, TransformProperty},
    spring::{CursorSpring, SpringConfig},
};
