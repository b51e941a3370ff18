pub mod glyph;
pub mod grid;
pub mod matcher;
