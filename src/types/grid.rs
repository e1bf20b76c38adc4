//! Rectangular grids of banner layer sequences.

use super::Layer;

/// A width x height arrangement of layer sequences, row-major.
///
/// Grids are transient request/response structures: built from client
/// input, transformed in memory, and discarded once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Layer>>,
}

impl Grid {
    /// Build a grid from a flat row-major list of cells.
    ///
    /// `width` and `height` below 1 are raised to 1. A short cell list is
    /// padded with empty sequences; a long one is truncated.
    pub fn from_cells(width: usize, height: usize, mut cells: Vec<Vec<Layer>>) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        cells.resize(width * height, Vec::new());
        Self {
            width,
            height,
            cells,
        }
    }

    /// Get the width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the layer sequence at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> &[Layer] {
        &self.cells[row * self.width + col]
    }

    /// Replace the layer sequence at (row, col).
    pub fn set_cell(&mut self, row: usize, col: usize, layers: Vec<Layer>) {
        self.cells[row * self.width + col] = layers;
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Vec<Layer>> {
        self.cells.iter()
    }

    /// Consume the grid, yielding its cells in row-major order.
    pub fn into_cells(self) -> Vec<Vec<Layer>> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_exact() {
        let cells = vec![vec![Layer::base("red")], vec![], vec![], vec![]];
        let grid = Grid::from_cells(2, 2, cells);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell(0, 0), &[Layer::base("red")]);
        assert!(grid.cell(1, 1).is_empty());
    }

    #[test]
    fn test_from_cells_pads_short_input() {
        let grid = Grid::from_cells(3, 2, vec![vec![Layer::base("blue")]]);
        assert_eq!(grid.cells().count(), 6);
        assert!(grid.cell(1, 2).is_empty());
    }

    #[test]
    fn test_from_cells_truncates_excess() {
        let cells = vec![vec![], vec![], vec![], vec![Layer::base("lime")]];
        let grid = Grid::from_cells(1, 2, cells);
        assert_eq!(grid.cells().count(), 2);
    }

    #[test]
    fn test_dimensions_raised_to_one() {
        let grid = Grid::from_cells(0, 0, vec![]);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.cells().count(), 1);
    }

    #[test]
    fn test_set_cell() {
        let mut grid = Grid::from_cells(2, 1, vec![]);
        grid.set_cell(0, 1, vec![Layer::base("pink")]);
        assert_eq!(grid.cell(0, 1), &[Layer::base("pink")]);
        assert!(grid.cell(0, 0).is_empty());
    }
}
