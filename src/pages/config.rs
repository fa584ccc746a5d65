//! Per-page configuration records.

use std::collections::BTreeSet;

use crate::foundation::{
    core::{Point, Rgba8, Vec2},
    error::{MotionError, MotionResult},
};
use crate::render::{backdrop::BackdropLayer, grid_warp::GridWarp};
use crate::reveal::{sequencer::BootTiming, state::BootScript};
use crate::transform::{scroll::ParallaxBinding, spring::SpringConfig};

/// The seven themed variants.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    /// Space and astronomy.
    One,
    /// Cyberpunk terminal.
    Two,
    /// Glassmorphism.
    Three,
    /// Interactive code canvas.
    Four,
    /// Retro synthwave.
    Five,
    /// Brutalist minimal.
    Six,
    /// Science lab.
    Seven,
}

impl PageId {
    pub const ALL: [Self; 7] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Four => "four",
            Self::Five => "five",
            Self::Six => "six",
            Self::Seven => "seven",
        }
    }

    /// Route of the page, e.g. `/portfolio-two`.
    pub fn route(self) -> String {
        format!("/portfolio-{}", self.as_str())
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageId {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("portfolio-").unwrap_or(&key);
        if let Ok(n) = key.parse::<usize>()
            && (1..=Self::ALL.len()).contains(&n)
        {
            return Ok(Self::ALL[n - 1]);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| MotionError::validation(format!("unknown page '{s}'")))
    }
}

/// Spring-following cursor ring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CursorConfig {
    pub spring: SpringConfig,
    /// Subtracted from the pointer so the ring centers on it.
    pub hotspot: Vec2,
    /// Position before the first pointer move (off screen).
    pub start: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BootConfig {
    pub script: BootScript,
    #[serde(default)]
    pub timing: BootTiming,
}

/// A periodic glitch flash: on for `active_ms` every `period_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlitchPulse {
    pub period_ms: u64,
    pub active_ms: u64,
}

impl Default for GlitchPulse {
    fn default() -> Self {
        Self {
            period_ms: 5000,
            active_ms: 100,
        }
    }
}

impl GlitchPulse {
    pub fn validate(&self) -> MotionResult<()> {
        if self.period_ms == 0 {
            return Err(MotionError::configuration("glitch period must be > 0"));
        }
        if self.active_ms == 0 || self.active_ms >= self.period_ms {
            return Err(MotionError::configuration(
                "glitch active time must be > 0 and shorter than its period",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub link: String,
}

impl ProjectCard {
    pub fn new(title: &str, description: &str, tech: &[&str], link: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            tech: tech.iter().map(|t| t.to_string()).collect(),
            link: link.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub href: String,
}

impl ContactLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Everything that makes one page variant: theme, backdrop layers, motion bindings
/// and content records.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    pub id: PageId,
    pub title: String,
    pub theme: String,
    pub description: String,
    pub background: Rgba8,
    #[serde(default)]
    pub layers: Vec<BackdropLayer>,
    /// Scroll-driven bindings. Targets naming a layer also move that layer.
    #[serde(default)]
    pub parallax: Vec<ParallaxBinding>,
    /// Spring that smooths the pointer fed to parallax layers; `None` uses it raw.
    #[serde(default)]
    pub pointer_parallax: Option<SpringConfig>,
    #[serde(default)]
    pub cursor: Option<CursorConfig>,
    #[serde(default)]
    pub grid_warp: Option<GridWarp>,
    #[serde(default)]
    pub boot: Option<BootConfig>,
    #[serde(default)]
    pub glitch: Option<GlitchPulse>,
    /// Pins the field seed; a fresh seed is drawn per mount otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub projects: Vec<ProjectCard>,
    #[serde(default)]
    pub contacts: Vec<ContactLink>,
}

impl PageConfig {
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every nested record; the first problem wins.
    pub fn validate(&self) -> MotionResult<()> {
        if self.title.trim().is_empty() {
            return Err(MotionError::configuration("page title must not be empty"));
        }
        let mut names = BTreeSet::new();
        for layer in &self.layers {
            layer.validate()?;
            if !names.insert(layer.name.as_str()) {
                return Err(MotionError::configuration(format!(
                    "duplicate layer name '{}'",
                    layer.name
                )));
            }
        }
        for binding in &self.parallax {
            if binding.target.trim().is_empty() {
                return Err(MotionError::configuration(
                    "parallax binding needs a target",
                ));
            }
        }
        if let Some(spring) = &self.pointer_parallax {
            spring.validate()?;
        }
        if let Some(cursor) = &self.cursor {
            cursor.spring.validate()?;
        }
        if let Some(grid) = &self.grid_warp {
            grid.validate()?;
        }
        if let Some(boot) = &self.boot {
            boot.timing.validate()?;
        }
        if let Some(glitch) = &self.glitch {
            glitch.validate()?;
        }
        for card in &self.projects {
            if card.title.trim().is_empty() || card.link.trim().is_empty() {
                return Err(MotionError::configuration(
                    "project cards need a title and a link",
                ));
            }
        }
        Ok(())
    }

    /// Names of every scroll binding target, deduplicated.
    pub fn parallax_targets(&self) -> BTreeSet<&str> {
        self.parallax.iter().map(|b| b.target.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/config.rs"]
mod tests;
