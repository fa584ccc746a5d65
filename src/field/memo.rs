use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use crate::field::generator::{DecorativeElement, FieldSpec, generate_field};
use crate::field::glyphs::{GlyphColumn, GlyphRainSpec, generate_glyph_columns};
use crate::foundation::error::MotionResult;

/// Lazily generated, then frozen, sequence. Reads after the first return the same `Rc`.
#[derive(Debug)]
pub struct Memoized<T> {
    value: OnceCell<Rc<[T]>>,
    generations: Cell<u32>,
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self {
            value: OnceCell::new(),
            generations: Cell::new(0),
        }
    }
}

impl<T> Memoized<T> {
    pub fn get_or_try_init(
        &self,
        init: impl FnOnce() -> MotionResult<Vec<T>>,
    ) -> MotionResult<Rc<[T]>> {
        if let Some(v) = self.value.get() {
            return Ok(Rc::clone(v));
        }
        let generated: Rc<[T]> = init()?.into();
        self.generations.set(self.generations.get() + 1);
        Ok(Rc::clone(self.value.get_or_init(|| generated)))
    }

    pub fn is_generated(&self) -> bool {
        self.value.get().is_some()
    }

    /// How many times the generator ran. Anything above 1 is a defect.
    pub fn generations(&self) -> u32 {
        self.generations.get()
    }
}

/// A decorative field bound to one mount.
#[derive(Debug)]
pub struct MemoField {
    spec: FieldSpec,
    seed: u64,
    memo: Memoized<DecorativeElement>,
}

impl MemoField {
    /// Validates eagerly so configuration errors surface at setup, not on first render.
    pub fn new(spec: FieldSpec, seed: u64) -> MotionResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            seed,
            memo: Memoized::default(),
        })
    }

    pub fn elements(&self) -> MotionResult<Rc<[DecorativeElement]>> {
        self.memo
            .get_or_try_init(|| generate_field(&self.spec, self.seed))
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn generations(&self) -> u32 {
        self.memo.generations()
    }
}

/// A glyph rain bound to one mount.
#[derive(Debug)]
pub struct MemoGlyphRain {
    spec: GlyphRainSpec,
    seed: u64,
    memo: Memoized<GlyphColumn>,
}

impl MemoGlyphRain {
    pub fn new(spec: GlyphRainSpec, seed: u64) -> MotionResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            seed,
            memo: Memoized::default(),
        })
    }

    pub fn columns(&self) -> MotionResult<Rc<[GlyphColumn]>> {
        self.memo
            .get_or_try_init(|| generate_glyph_columns(&self.spec, self.seed))
    }

    pub fn spec(&self) -> &GlyphRainSpec {
        &self.spec
    }

    pub fn generations(&self) -> u32 {
        self.memo.generations()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/memo.rs"]
mod tests;
