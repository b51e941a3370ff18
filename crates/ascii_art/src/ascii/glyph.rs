use font8x8::legacy::BASIC_LEGACY;

/// Side length of the glyphs produced by [`BitmapFont`].
pub const GLYPH_SIZE: usize = 8;

/// Boolean raster of a single character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    bits: Vec<bool>,
}

impl GlyphBitmap {
    /// `bits` is row-major, `width * height` long.
    pub fn new(width: usize, height: usize, bits: Vec<bool>) -> Self {
        assert_eq!(width * height, bits.len());
        Self { bits }
    }

    pub fn blank(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![false; width * height])
    }

    /// Fraction of set pixels, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        let on = self.bits.iter().filter(|&&bit| bit).count();
        on as f64 / self.bits.len() as f64
    }
}

/// Source of glyph bitmaps used to measure how much ink a character carries.
pub trait GlyphRaster {
    fn rasterize(&self, ch: char) -> GlyphBitmap;
}

/// Public domain 8x8 bitmap font covering U+0000 to U+007F.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFont;

impl GlyphRaster for BitmapFont {
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        let Some(&rows) = BASIC_LEGACY.get(ch as usize) else {
            return GlyphBitmap::blank(GLYPH_SIZE, GLYPH_SIZE);
        };

        let mut bits = Vec::with_capacity(GLYPH_SIZE * GLYPH_SIZE);
        for row in rows {
            // Bit 0 is the leftmost pixel.
            for x in 0..GLYPH_SIZE {
                bits.push((row >> x) & 1 == 1);
            }
        }
        GlyphBitmap::new(GLYPH_SIZE, GLYPH_SIZE, bits)
    }
}


#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::HashMap;

    use super::{GlyphBitmap, GlyphRaster};

    /// 4x4 glyphs whose first `n` pixels are set, `n` looked up per character.
    pub(crate) struct InkTable(HashMap<char, usize>);

    impl InkTable {
        pub(crate) fn new(entries: &[(char, usize)]) -> Self {
            Self(entries.iter().copied().collect())
        }
    }

    impl GlyphRaster for InkTable {
        fn rasterize(&self, ch: char) -> GlyphBitmap {
            let on = self.0.get(&ch).copied().unwrap_or(0).min(16);
            GlyphBitmap::new(4, 4, (0..16).map(|i| i < on).collect())
        }
    }
}
