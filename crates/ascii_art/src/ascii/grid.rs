/// Row-major grid shared by the sub-image, brightness and character stages.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<T>,
}

/// Output of a conversion: one character per cell.
pub type CharGrid = Grid<char>;

impl<T> Grid<T> {
    pub fn new(columns: usize, rows: usize, cells: Vec<T>) -> Self {
        assert_eq!(columns * rows, cells.len());
        Self { columns, rows, cells }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` rejects a zero chunk size.
        self.cells.chunks(self.columns.max(1)).take(self.rows)
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid { columns: self.columns, rows: self.rows, cells: self.cells.iter().map(f).collect() }
    }

    /// Like [`Grid::map`], stopping at the first error.
    pub fn try_map<U, E, F>(&self, f: F) -> Result<Grid<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let cells = self.cells.iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Grid { columns: self.columns, rows: self.rows, cells })
    }
}

impl Grid<char> {
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| row.iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_row_major_order() {
        let grid = Grid::new(3, 2, vec!['a', 'b', 'c', 'd', 'e', 'f']);
        let lines: Vec<String> = grid.lines().collect();
        assert_eq!(lines, vec!["abc".to_string(), "def".to_string()]);
        assert_eq!(grid.get(1, 0), Some(&'d'));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn try_map_stops_on_error() {
        let grid = Grid::new(2, 1, vec![1, -1]);
        let mapped: Result<Grid<u32>, String> = grid
            .try_map(|&v| if v >= 0 { Ok(v as u32) } else { Err(format!("negative {v}")) });
        assert_eq!(mapped, Err("negative -1".to_string()));
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid: Grid<char> = Grid::new(0, 0, Vec::new());
        assert_eq!(grid.rows().count(), 0);
    }
}
