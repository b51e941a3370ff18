use image::RgbImage;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;
const MAX_CHANNEL: f64 = 255.0;

/// Mean relative luminance of `image`, in `[0, 1]`. Empty images are black.
pub fn brightness(image: &RgbImage) -> f64 {
    let count = image.width() as usize * image.height() as usize;
    if count == 0 {
        return 0.0;
    }

    let sum: f64 = image
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b)
        })
        .sum();

    (sum / (count as f64 * MAX_CHANNEL)).clamp(0.0, 1.0)
}
