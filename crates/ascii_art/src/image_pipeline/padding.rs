use std::borrow::Cow;

use image::{Rgb, RgbImage};

const PADDING_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Pads `image` with white up to power-of-two dimensions, keeping it centered.
///
/// Returns the input borrowed when both sides already are powers of two.
/// When the padding on an axis is odd, the extra pixel goes to the right or
/// bottom side.
pub fn pad(image: &RgbImage) -> Cow<'_, RgbImage> {
    let (width, height) = image.dimensions();
    let padded_width = width.next_power_of_two();
    let padded_height = height.next_power_of_two();

    if padded_width == width && padded_height == height {
        return Cow::Borrowed(image);
    }

    let (horizontal_padding, vertical_padding) = padding_offset(width, height);

    let mut padded = RgbImage::from_pixel(padded_width, padded_height, PADDING_COLOR);
    for (x, y, pixel) in image.enumerate_pixels() {
        padded.put_pixel(x + horizontal_padding, y + vertical_padding, *pixel);
    }

    Cow::Owned(padded)
}

/// Offset of the original content inside the padded image, as `(x, y)`.
pub(crate) fn padding_offset(width: u32, height: u32) -> (u32, u32) {
    ((width.next_power_of_two() - width) / 2, (height.next_power_of_two() - height) / 2)
}
