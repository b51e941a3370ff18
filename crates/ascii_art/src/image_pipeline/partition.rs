use image::{imageops, RgbImage};

use super::geometry::Geometry;
use crate::ascii::grid::Grid;
use crate::AsciiError;

/// Splits `image` into `resolution` square cells per row.
///
/// Each cell is an owned copy of its source region. Pixels beyond the last
/// full cell on either axis are dropped.
pub fn partition(image: &RgbImage, resolution: u32) -> Result<Grid<RgbImage>, AsciiError> {
    let (width, height) = image.dimensions();
    let geometry = Geometry::derive(width, height, resolution).ok_or(
        AsciiError::InvalidLayout { width, height, resolution },
    )?;
    Ok(partition_with(image, &geometry))
}

pub(crate) fn partition_with(image: &RgbImage, geometry: &Geometry) -> Grid<RgbImage> {
    let size = geometry.cell_size;
    let mut cells = Vec::with_capacity(geometry.cell_count());
    for row in 0..geometry.rows {
        for column in 0..geometry.columns {
            let cell = imageops::crop_imm(image, column * size, row * size, size, size);
            cells.push(cell.to_image());
        }
    }
    Grid::new(geometry.columns as usize, geometry.rows as usize, cells)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn cells_copy_their_region() {
        let image = RgbImage::from_fn(8, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let grid = partition(&image, 2).unwrap();
        assert_eq!((grid.columns, grid.rows), (2, 1));

        let right = grid.get(0, 1).unwrap();
        assert_eq!(right.dimensions(), (4, 4));
        assert_eq!(*right.get_pixel(0, 0), Rgb([4, 0, 0]));
        assert_eq!(*right.get_pixel(3, 3), Rgb([7, 3, 0]));
    }

    #[test]
    fn grid_shape_is_rows_by_resolution() {
        let image = RgbImage::new(16, 32);
        let grid = partition(&image, 4).unwrap();
        assert_eq!((grid.columns, grid.rows), (4, 8));
        assert!(grid.cells.iter().all(|cell| cell.dimensions() == (4, 4)));
    }

    #[test]
    fn remainder_is_not_covered() {
        let image = RgbImage::new(10, 10);
        let grid = partition(&image, 3).unwrap();
        assert_eq!((grid.columns, grid.rows), (3, 3));
        assert!(grid.cells.iter().all(|cell| cell.dimensions() == (3, 3)));
    }

    #[test]
    fn zero_resolution_is_an_error() {
        let image = RgbImage::new(4, 4);
        assert!(matches!(
            partition(&image, 0),
            Err(AsciiError::InvalidLayout { resolution: 0, .. })
        ));
        assert!(partition(&image, 5).is_err());
    }
}
