//! Built-in page variants and the gallery that links them.

use crate::animation::{ease::Ease, track::LoopTrack};
use crate::field::{
    generator::{AttrRange, FieldSpec},
    glyphs::{GlyphRainSpec, GlyphSource, MATRIX_CHARSET},
};
use crate::foundation::{
    core::{Point, Rgba8, Vec2},
    error::MotionResult,
};
use crate::pages::config::{
    BootConfig, ContactLink, CursorConfig, GlitchPulse, PageConfig, PageId, ProjectCard,
};
use crate::render::{
    backdrop::{BackdropLayer, LayerKind, Orb},
    grid_warp::GridWarp,
};
use crate::reveal::{sequencer::BootTiming, state::BootScript};
use crate::transform::{
    pointer::PointerParallax,
    scroll::{ParallaxBinding, TransformProperty},
    spring::SpringConfig,
};

/// One card on the gallery page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GalleryEntry {
    pub id: PageId,
    pub title: &'static str,
    pub theme: &'static str,
    pub description: &'static str,
}

static GALLERY: [GalleryEntry; 7] = [
    GalleryEntry {
        id: PageId::Two,
        title: "The Terminal Hacker",
        theme: "Cyberpunk & Hacker",
        description: "Matrix-inspired cyberpunk design with boot sequences and cascading code.",
    },
    GalleryEntry {
        id: PageId::Four,
        title: "The Code Canvas",
        theme: "Interactive Grid",
        description: "Interactive canvas grid that warps with mouse movement and binary rain effects.",
    },
    GalleryEntry {
        id: PageId::Five,
        title: "The Neon Playground",
        theme: "Retro Synthwave",
        description: "80s synthwave retro vibes with animated sunset and perspective grid floor.",
    },
    GalleryEntry {
        id: PageId::One,
        title: "The Cosmic Developer",
        theme: "Space & Astronomy",
        description: "A journey through space with parallax stars, nebula effects, and floating particles.",
    },
    GalleryEntry {
        id: PageId::Three,
        title: "The Liquid Morphism",
        theme: "Glassmorphism",
        description: "Premium glassmorphic design with morphing blobs and magnetic cursor effects.",
    },
    GalleryEntry {
        id: PageId::Six,
        title: "The Minimalist Brutalist",
        theme: "Brutalist Minimal",
        description: "Bold typography and stark contrasts. Black and white brutalist editorial design.",
    },
    GalleryEntry {
        id: PageId::Seven,
        title: "The Developer's Lab",
        theme: "Science Lab",
        description: "Science laboratory theme with bubbling animations and specimen jar project cards.",
    },
];

/// Gallery entries in display order.
pub fn gallery() -> &'static [GalleryEntry] {
    &GALLERY
}

pub fn gallery_entry(id: PageId) -> &'static GalleryEntry {
    // Every id has exactly one entry.
    GALLERY
        .iter()
        .find(|e| e.id == id)
        .unwrap_or(&GALLERY[0])
}

/// Boot lines of the terminal page.
pub const TERMINAL_BOOT_LINES: [&str; 5] = [
    "INITIALIZING NEURAL INTERFACE...",
    "LOADING BIOMETRIC DATA...",
    "DECRYPTING CREDENTIALS...",
    "ACCESS GRANTED",
    "> SYSTEM READY_",
];

const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);
const PURPLE_500: (u8, u8, u8) = (168, 85, 247);
const PINK_500: (u8, u8, u8) = (236, 72, 153);
const BLUE_500: (u8, u8, u8) = (59, 130, 246);
const CYAN_500: (u8, u8, u8) = (6, 182, 212);
const EMERALD_500: (u8, u8, u8) = (16, 185, 129);
const VIOLET_500: (u8, u8, u8) = (139, 92, 246);

fn tw(c: (u8, u8, u8), alpha: f64) -> Rgba8 {
    Rgba8::with_alpha(c.0, c.1, c.2, alpha)
}

fn base(id: PageId, background: Rgba8) -> PageConfig {
    let entry = gallery_entry(id);
    PageConfig {
        id,
        title: entry.title.to_string(),
        theme: entry.theme.to_string(),
        description: entry.description.to_string(),
        background,
        layers: Vec::new(),
        parallax: Vec::new(),
        pointer_parallax: None,
        cursor: None,
        grid_warp: None,
        boot: None,
        glitch: None,
        seed: None,
        projects: default_projects(),
        contacts: default_contacts(),
    }
}

fn default_projects() -> Vec<ProjectCard> {
    vec![
        ProjectCard::new(
            "Waya Clothing",
            "Modern e-commerce platform for fashion retail with seamless shopping experience and secure payment integration.",
            &["Next.js", "E-commerce", "Stripe", "Tailwind CSS"],
            "https://wayaclothing.com/",
        ),
        ProjectCard::new(
            "Nexpaa",
            "Innovative business platform with advanced features, real-time analytics, and comprehensive integrations.",
            &["React", "Node.js", "MongoDB", "REST API"],
            "https://www.nexpaa.com/",
        ),
        ProjectCard::new(
            "PayDecorder",
            "Secure payment processing platform with seamless transaction management and multi-currency support.",
            &["Next.js", "Payment APIs", "PostgreSQL", "Security"],
            "https://www.paydecorder.com/",
        ),
    ]
}

fn default_contacts() -> Vec<ContactLink> {
    vec![ContactLink::new("WhatsApp", "https://wa.me/256758548836")]
}

/// Twinkle track, `[a, b, a]` with the default keyframe easing.
fn pulse(values: [f64; 3], duration_ms: u64) -> MotionResult<LoopTrack> {
    Ok(LoopTrack::new(values.to_vec(), duration_ms)?.with_ease(Ease::InOutQuad))
}

fn linear(values: Vec<f64>, duration_ms: u64) -> MotionResult<LoopTrack> {
    LoopTrack::new(values, duration_ms)
}

fn bind(
    target: &str,
    property: TransformProperty,
    stops: &[f64],
    outputs: &[f64],
) -> MotionResult<ParallaxBinding> {
    ParallaxBinding::new(target, property, stops.to_vec(), outputs.to_vec())
}

/// Built-in configuration for `id`.
pub fn preset(id: PageId) -> MotionResult<PageConfig> {
    let config = match id {
        PageId::One => cosmic()?,
        PageId::Two => terminal()?,
        PageId::Three => liquid()?,
        PageId::Four => code_canvas()?,
        PageId::Five => synthwave()?,
        PageId::Six => brutalist()?,
        PageId::Seven => lab()?,
    };
    config.validate()?;
    Ok(config)
}

fn cosmic() -> MotionResult<PageConfig> {
    let mut page = base(PageId::One, Rgba8::opaque(0x0a, 0x01, 0x18));
    page.layers = vec![
        BackdropLayer::new(
            "stars",
            LayerKind::Stars {
                field: FieldSpec::scattered(100)
                    .with_size(AttrRange::span(0.5, 0.5))
                    .with_duration(AttrRange::span(2.0, 3.0))
                    .with_delay(AttrRange::span(0.0, 2.0)),
                color: WHITE,
                radius: 2.0,
                opacity: pulse([0.2, 1.0, 0.2], 1000)?,
                scale: pulse([1.0, 1.5, 1.0], 1000)?,
            },
        ),
        BackdropLayer::new(
            "nebula",
            LayerKind::Orbs {
                orbs: vec![
                    Orb {
                        opacity: Some(pulse([1.0, 0.5, 1.0], 2000)?),
                        ..Orb::new(Point::new(25.0, 30.0), 600.0, tw(PURPLE_500, 0.3))
                    },
                    Orb {
                        opacity: Some(LoopTrack {
                            delay_ms: 1000,
                            ..pulse([1.0, 0.5, 1.0], 2000)?
                        }),
                        ..Orb::new(Point::new(75.0, 70.0), 500.0, tw(BLUE_500, 0.3))
                    },
                    Orb {
                        opacity: Some(LoopTrack {
                            delay_ms: 2000,
                            ..pulse([1.0, 0.5, 1.0], 2000)?
                        }),
                        ..Orb::new(Point::new(50.0, 50.0), 400.0, tw(PINK_500, 0.2))
                    },
                ],
            },
        )
        .with_opacity(0.3),
        BackdropLayer::new(
            "particles",
            LayerKind::Particles {
                field: FieldSpec::scattered(20).with_duration(AttrRange::fixed(2.0)),
                color: Rgba8::opaque(192, 132, 252),
                radius: 4.0,
                opacity: pulse([0.3, 0.7, 0.3], 2000)?,
                scale: pulse([1.0, 1.2, 1.0], 2000)?,
                parallax: PointerParallax { gain: 5.0 },
            },
        ),
    ];
    page.parallax = vec![
        bind("nebula", TransformProperty::TranslateX, &[0.0, 1.0], &[0.0, -100.0])?,
        bind("nebula", TransformProperty::TranslateY, &[0.0, 1.0], &[0.0, 200.0])?,
        bind("hero", TransformProperty::Opacity, &[0.0, 0.2], &[1.0, 0.0])?,
        bind("hero", TransformProperty::Scale, &[0.0, 0.2], &[1.0, 0.8])?,
        bind("about", TransformProperty::Opacity, &[0.15, 0.25, 0.35], &[0.0, 1.0, 0.0])?,
        bind("about", TransformProperty::Scale, &[0.15, 0.25, 0.35], &[0.8, 1.0, 0.8])?,
        bind("projects", TransformProperty::Opacity, &[0.35, 0.45, 0.95], &[0.0, 1.0, 1.0])?,
    ];
    page.pointer_parallax = Some(SpringConfig {
        stiffness: 50.0,
        damping: 20.0,
    });
    page.contacts.push(ContactLink::new("Email", "mailto:brian@example.com"));
    Ok(page)
}

fn terminal() -> MotionResult<PageConfig> {
    let green = |a: f64| Rgba8::with_alpha(0, 255, 0, a);
    let mut page = base(PageId::Two, Rgba8::opaque(0, 0, 0));
    page.layers = vec![
        BackdropLayer::new(
            "matrix-rain",
            LayerKind::GlyphRain {
                rain: GlyphRainSpec {
                    columns: FieldSpec::scattered(50)
                        .with_y(AttrRange::fixed(0.0))
                        .with_duration(AttrRange::span(10.0, 10.0))
                        .with_delay(AttrRange::span(0.0, 5.0)),
                    glyphs_per_column: 30,
                    source: GlyphSource::Random {
                        charset: MATRIX_CHARSET.to_string(),
                    },
                },
                color: Rgba8::with_alpha(34, 197, 94, 0.7),
                cell: 16.0,
                fall: linear(vec![0.0, 1.0], 1000)?,
                lane_pct: None,
            },
        )
        .with_opacity(0.2),
        BackdropLayer::new(
            "glitch-grid",
            LayerKind::GridPattern {
                spacing: 50.0,
                color: green(0.3),
            },
        )
        .with_opacity(0.05),
        BackdropLayer::new(
            "scanlines",
            LayerKind::Scanlines {
                period: 4.0,
                color: green(0.1),
            },
        )
        .with_opacity(0.1),
    ];
    page.boot = Some(BootConfig {
        script: BootScript::new(TERMINAL_BOOT_LINES)?,
        timing: BootTiming::default(),
    });
    Ok(page)
}

fn liquid() -> MotionResult<PageConfig> {
    let mut page = base(PageId::Three, Rgba8::opaque(2, 6, 23));
    let blob = |x: f64, y: f64, size: f64, color: (u8, u8, u8), delay_s: u64| -> MotionResult<Orb> {
        let timed = |values: Vec<f64>| -> MotionResult<LoopTrack> {
            Ok(LoopTrack {
                delay_ms: delay_s * 1000,
                ..LoopTrack::new(values, 20_000)?.with_ease(Ease::InOutQuad)
            })
        };
        Ok(Orb {
            drift_x: Some(timed(vec![0.0, 100.0, -100.0, 0.0])?),
            drift_y: Some(timed(vec![0.0, -100.0, 100.0, 0.0])?),
            scale: Some(timed(vec![1.0, 1.2, 0.8, 1.0])?),
            opacity: None,
            ..Orb::new(Point::new(x, y), size, tw(color, 1.0))
        })
    };
    page.layers = vec![
        BackdropLayer::new(
            "blobs",
            LayerKind::Orbs {
                orbs: vec![
                    blob(20.0, 20.0, 600.0, PURPLE_500, 0)?,
                    blob(70.0, 60.0, 500.0, PINK_500, 2)?,
                    blob(50.0, 40.0, 450.0, BLUE_500, 4)?,
                    blob(80.0, 30.0, 400.0, CYAN_500, 6)?,
                ],
            },
        )
        .with_opacity(0.3),
    ];
    page.cursor = Some(CursorConfig {
        spring: SpringConfig {
            stiffness: 700.0,
            damping: 25.0,
        },
        hotspot: Vec2::new(16.0, 16.0),
        start: Point::new(-100.0, -100.0),
    });
    Ok(page)
}

fn code_canvas() -> MotionResult<PageConfig> {
    let mut page = base(PageId::Four, Rgba8::opaque(0, 0, 0));
    page.layers = vec![
        BackdropLayer::new(
            "binary-rain",
            LayerKind::GlyphRain {
                rain: GlyphRainSpec {
                    columns: FieldSpec::scattered(20)
                        .with_y(AttrRange::fixed(0.0))
                        .with_duration(AttrRange::span(10.0, 10.0))
                        .with_delay(AttrRange::span(0.0, 5.0)),
                    glyphs_per_column: 30,
                    source: GlyphSource::Alternating,
                },
                color: tw(PURPLE_500, 1.0),
                cell: 16.0,
                fall: linear(vec![0.0, 1.0], 1000)?,
                lane_pct: Some(5.0),
            },
        )
        .with_opacity(0.1),
    ];
    page.grid_warp = Some(GridWarp::default());
    page.projects = vec![
        ProjectCard::new(
            "Waya Clothing",
            "E-commerce platform with modern architecture and secure payment gateway",
            &["Next.js", "Stripe", "Tailwind", "Vercel"],
            "https://wayaclothing.com/",
        ),
        ProjectCard::new(
            "Nexpaa",
            "Business platform with real-time analytics and integrations",
            &["React", "Node.js", "MongoDB", "REST API"],
            "https://www.nexpaa.com/",
        ),
        ProjectCard::new(
            "PayDecorder",
            "Payment processing with transaction management",
            &["Next.js", "Payment APIs", "PostgreSQL", "Security"],
            "https://www.paydecorder.com/",
        ),
    ];
    Ok(page)
}

fn synthwave() -> MotionResult<PageConfig> {
    let mut page = base(PageId::Five, Rgba8::opaque(0x0a, 0x0a, 0x1f));
    page.layers = vec![
        BackdropLayer::new(
            "stars",
            LayerKind::Stars {
                field: FieldSpec::scattered(100)
                    .with_size(AttrRange::span(1.0, 2.0))
                    .with_duration(AttrRange::fixed(3.0))
                    .with_delay(AttrRange::span(0.0, 2.0)),
                color: WHITE,
                radius: 0.5,
                opacity: pulse([0.3, 1.0, 0.3], 3000)?,
                scale: linear(vec![1.0], 3000)?,
            },
        ),
        BackdropLayer::new(
            "sun",
            LayerKind::SunRays {
                center: Point::new(50.0, 20.0),
                core_radius: 96.0,
                core_color: Rgba8::opaque(250, 204, 21),
                count: 20,
                step_deg: 18.0,
                length: 128.0,
                width: 4.0,
                color: Rgba8::opaque(250, 204, 21),
                opacity: pulse([0.3, 1.0, 0.3], 2000)?,
                stagger_ms: 100,
            },
        ),
        BackdropLayer::new(
            "floor",
            LayerKind::SynthFloor {
                horizontal: 30,
                vertical: 20,
                height_frac: 0.5,
                horizontal_color: tw(PINK_500, 1.0),
                vertical_color: tw(VIOLET_500, 0.5),
            },
        ),
    ];
    page.parallax = vec![
        bind("sun", TransformProperty::TranslateY, &[0.0, 1.0], &[0.0, 200.0])?,
        bind("floor", TransformProperty::TranslateY, &[0.0, 1.0], &[0.0, -100.0])?,
    ];
    page.glitch = Some(GlitchPulse::default());
    Ok(page)
}

fn brutalist() -> MotionResult<PageConfig> {
    let mut page = base(PageId::Six, WHITE);
    page.parallax = vec![
        bind("name", TransformProperty::TranslateY, &[0.0, 0.2], &[0.0, -100.0])?,
        bind("title", TransformProperty::TranslateY, &[0.0, 0.2], &[0.0, 100.0])?,
    ];
    page.projects.push(ProjectCard::new(
        "APCA Conference 2025",
        "International conference website for the 8th African Palliative Care Conference in Botswana.",
        &["Abstract submission", "Payments", "Voting", "AI chatbot"],
        "https://conference.africanpalliativecare.org/",
    ));
    page.contacts.push(ContactLink::new("Email", "mailto:brian@wabtech.tech"));
    Ok(page)
}

fn lab() -> MotionResult<PageConfig> {
    let mut page = base(PageId::Seven, Rgba8::opaque(15, 23, 42));
    page.layers = vec![
        BackdropLayer::new(
            "bubbles",
            LayerKind::Bubbles {
                field: FieldSpec::scattered(30)
                    .with_y(AttrRange::fixed(100.0))
                    .with_size(AttrRange::span(20.0, 40.0))
                    .with_duration(AttrRange::span(5.0, 5.0))
                    .with_delay(AttrRange::span(0.0, 3.0)),
                fill: tw(EMERALD_500, 0.1),
                ring: tw(EMERALD_500, 0.3),
                rise: linear(vec![-100.0, -1000.0], 1000)?,
                opacity: linear(vec![0.0, 0.5, 0.0], 1000)?,
            },
        ),
        BackdropLayer::new(
            "lab-grid",
            LayerKind::GridPattern {
                spacing: 30.0,
                color: tw(EMERALD_500, 0.3),
            },
        )
        .with_opacity(0.1),
        BackdropLayer::new(
            "glow",
            LayerKind::Orbs {
                orbs: vec![
                    Orb {
                        scale: Some(pulse([1.0, 1.2, 1.0], 8000)?),
                        opacity: Some(pulse([0.3, 0.5, 0.3], 8000)?),
                        ..Orb::new(Point::new(20.0, 20.0), 384.0, tw(EMERALD_500, 0.2))
                    },
                    Orb {
                        scale: Some(pulse([1.2, 1.0, 1.2], 8000)?),
                        opacity: Some(pulse([0.5, 0.3, 0.5], 8000)?),
                        ..Orb::new(Point::new(80.0, 80.0), 384.0, tw(CYAN_500, 0.2))
                    },
                ],
            },
        ),
    ];
    page.parallax = vec![bind(
        "beaker",
        TransformProperty::TranslateY,
        &[0.0, 1.0],
        &[0.0, -200.0],
    )?];
    Ok(page)
}

#[cfg(test)]
#[path = "../../tests/unit/pages/presets.rs"]
mod tests;
