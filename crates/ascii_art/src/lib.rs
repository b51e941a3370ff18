mod ascii;
mod image_pipeline;

use std::path::Path;

use log::debug;

pub use image::{Rgb, RgbImage};

pub use ascii::{
    glyph::{BitmapFont, GlyphBitmap, GlyphRaster, GLYPH_SIZE},
    grid::{CharGrid, Grid},
    matcher::{CharMatcher, RoundingPolicy, MIN_ACTIVE_CHARS},
};
pub use image_pipeline::{
    brightness::brightness,
    geometry::{Geometry, ResolutionBounds},
    loader::load_image,
    padding::pad,
    partition::partition,
};

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("resolution {resolution} does not fit a {width}x{height} image")]
    InvalidLayout { width: u32, height: u32, resolution: u32 },
    #[error("no character found for brightness {brightness:.4} when rounding {policy}")]
    InvalidBrightnessQuery { brightness: f64, policy: RoundingPolicy },
    #[error("character set too small: {active} active, at least 2 required")]
    DegenerateCharacterSet { active: usize },
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub grid: CharGrid,
    /// Per-cell luminance the characters were matched against.
    pub brightness: Grid<f64>,
    pub geometry: Geometry,
}

/// Turns an image into a character grid using a [`CharMatcher`].
///
/// Every call re-derives the padded image, the cell brightness and the
/// characters from scratch; nothing is cached between resolutions.
#[derive(Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn render_path<P, G>(
        &self,
        path: P,
        resolution: u32,
        matcher: &CharMatcher<G>,
    ) -> Result<RenderOutput, AsciiError>
    where
        P: AsRef<Path>,
        G: GlyphRaster,
    {
        let image = load_image(path)?;
        self.render_image(&image, resolution, matcher)
    }

    pub fn render_image<G: GlyphRaster>(
        &self,
        image: &RgbImage,
        resolution: u32,
        matcher: &CharMatcher<G>,
    ) -> Result<RenderOutput, AsciiError> {
        if matcher.len() < MIN_ACTIVE_CHARS {
            return Err(AsciiError::DegenerateCharacterSet { active: matcher.len() });
        }

        let padded = pad(image);
        let (width, height) = padded.dimensions();
        let geometry = Geometry::derive(width, height, resolution)
            .ok_or(AsciiError::InvalidLayout { width, height, resolution })?;

        let cells = image_pipeline::partition::partition_with(&padded, &geometry);
        let luminance = cells.map(brightness);
        let grid = luminance.try_map(|&value| matcher.best_match(value))?;

        debug!(
            "rendered {}x{} cells of {}px from a {width}x{height} image ({} rounding)",
            geometry.columns,
            geometry.rows,
            geometry.cell_size,
            matcher.policy()
        );

        Ok(RenderOutput { grid, brightness: luminance, geometry })
    }
}
