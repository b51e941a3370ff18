use std::path::Path;

use image::RgbImage;
use log::info;

use crate::AsciiError;

/// Decodes the image at `path` into 8-bit RGB, dropping any alpha channel.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, AsciiError> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgb8();
    info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}
