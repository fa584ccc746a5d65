pub mod generator;
pub mod glyphs;
pub mod memo;
