/// Cell layout of an image decomposed at a given resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Side length of each square cell, in pixels.
    pub cell_size: u32,
    pub columns: u32,
    pub rows: u32,
}

impl Geometry {
    /// `resolution` is the number of cells per row.
    ///
    /// Returns `None` when the cell side would be zero. A resolution that does
    /// not divide the width leaves the right and bottom remainder uncovered.
    pub fn derive(width: u32, height: u32, resolution: u32) -> Option<Geometry> {
        if resolution == 0 {
            return None;
        }

        let cell_size = width / resolution;
        if cell_size == 0 {
            return None;
        }

        Some(Geometry { cell_size, columns: resolution, rows: height / cell_size })
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Range of resolutions an interactive session may move between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionBounds {
    pub min: u32,
    pub max: u32,
}

impl ResolutionBounds {
    pub fn for_image(width: u32, height: u32) -> Self {
        let min = if height == 0 { 1 } else { (width / height).max(1) };
        Self { min, max: width.min(height) }
    }

    pub fn can_double(&self, resolution: u32) -> bool {
        resolution.checked_mul(2).is_some_and(|doubled| doubled <= self.max)
    }

    pub fn can_halve(&self, resolution: u32) -> bool {
        resolution / 2 >= self.min
    }
}
