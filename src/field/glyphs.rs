use crate::field::generator::{DecorativeElement, FieldSpec, draw_element};
use crate::foundation::{
    error::{MotionError, MotionResult},
    math::Rng64,
};

/// Katakana plus binary digits used by the terminal page's rain.
pub const MATRIX_CHARSET: &str = "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

/// How each column's glyph string is produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphSource {
    /// Uniform draws from a charset, fixed per column at mount.
    Random { charset: String },
    /// Alternating `1`/`0` starting with `1` (binary rain).
    Alternating,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphRainSpec {
    pub columns: FieldSpec,
    pub glyphs_per_column: usize,
    pub source: GlyphSource,
}

impl GlyphRainSpec {
    pub fn validate(&self) -> MotionResult<()> {
        self.columns.validate()?;
        if let GlyphSource::Random { charset } = &self.source
            && charset.chars().next().is_none()
        {
            return Err(MotionError::configuration("glyph charset must not be empty"));
        }
        Ok(())
    }
}

/// A falling column with its glyphs drawn once.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphColumn {
    pub element: DecorativeElement,
    pub glyphs: String,
}

pub fn generate_glyph_columns(spec: &GlyphRainSpec, seed: u64) -> MotionResult<Vec<GlyphColumn>> {
    spec.validate()?;
    let charset: Vec<char> = match &spec.source {
        GlyphSource::Random { charset } => charset.chars().collect(),
        GlyphSource::Alternating => Vec::new(),
    };

    let mut rng = Rng64::new(seed);
    let mut out = Vec::with_capacity(spec.columns.count);
    for _ in 0..spec.columns.count {
        let element = draw_element(&spec.columns, &mut rng);
        let glyphs = match &spec.source {
            GlyphSource::Random { .. } => (0..spec.glyphs_per_column)
                .map(|_| charset[rng.next_index(charset.len())])
                .collect(),
            GlyphSource::Alternating => (0..spec.glyphs_per_column)
                .map(|j| if j % 2 == 0 { '1' } else { '0' })
                .collect(),
        };
        out.push(GlyphColumn { element, glyphs });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/field/glyphs.rs"]
mod tests;
