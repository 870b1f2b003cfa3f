//! Dense 2D cell storage.

use smallvec::SmallVec;
use stigmaze_core::{Cell, MazeView, Pos};

/// A rectangular, row-major array of cells.
///
/// `Grid` carries no pheromone field, so agents navigating a bare grid
/// fall back to a random walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `cols x rows` grid with every cell set to `fill`.
    pub fn filled(cols: u32, rows: u32, fill: Cell) -> Self {
        Self {
            cols,
            rows,
            cells: vec![fill; (cols as usize) * (rows as usize)],
        }
    }

    /// Build a grid from ASCII rows: `#` is a wall, anything else is path.
    ///
    /// Rows shorter than the first are padded with walls.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut grid = Self::filled(cols, rows.len() as u32, Cell::Wall);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().take(cols as usize).enumerate() {
                if ch != '#' {
                    grid.set(Pos::new(x as i32, y as i32), Cell::Path);
                }
            }
        }
        grid
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols as i32 || pos.y >= self.rows as i32 {
            return None;
        }
        Some(pos.y as usize * self.cols as usize + pos.x as usize)
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `pos`. Returns `false` (and does nothing)
    /// if `pos` is out of bounds.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// `true` if `pos` lies on the outermost ring of the grid.
    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.cols as i32 - 1 || pos.y == self.rows as i32 - 1
    }

    /// `true` if every cell on the outer ring is a wall.
    pub fn border_is_wall(&self) -> bool {
        self.positions()
            .filter(|&p| self.is_border(p))
            .all(|p| self.get(p) == Some(Cell::Wall))
    }

    /// The in-bounds 4-connected neighbours of `pos`.
    pub fn neighbours(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        let offsets: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        let mut result = SmallVec::new();
        for (dx, dy) in offsets {
            let n = Pos::new(pos.x + dx, pos.y + dy);
            if self.index(n).is_some() {
                result.push(n);
            }
        }
        result
    }

    /// Row-major iterator over every position in the grid.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |y| (0..cols).map(move |x| Pos::new(x, y)))
    }

    /// Row-major iterator over positions strictly inside the outer ring.
    pub fn interior_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols as i32;
        let rows = self.rows as i32;
        (1..rows - 1).flat_map(move |y| (1..cols - 1).map(move |x| Pos::new(x, y)))
    }

    /// Number of cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Raw row-major cells.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

impl MazeView for Grid {
    fn cols(&self) -> u32 {
        self.cols
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cell(&self, pos: Pos) -> Option<Cell> {
        self.get(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid_shape() {
        let g = Grid::filled(5, 3, Cell::Wall);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.as_slice().len(), 15);
        assert_eq!(g.count(Cell::Wall), 15);
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut g = Grid::filled(3, 3, Cell::Wall);
        assert!(g.set(Pos::new(1, 2), Cell::Path));
        assert_eq!(g.get(Pos::new(1, 2)), Some(Cell::Path));
        assert!(!g.set(Pos::new(3, 0), Cell::Path));
        assert_eq!(g.get(Pos::new(-1, 0)), None);
        assert_eq!(g.get(Pos::new(0, 3)), None);
    }

    #[test]
    fn neighbours_center_and_corner() {
        let g = Grid::filled(3, 3, Cell::Path);
        let center = g.neighbours(Pos::new(1, 1));
        assert_eq!(center.len(), 4);
        assert!(center.contains(&Pos::new(1, 0)));
        assert!(center.contains(&Pos::new(1, 2)));
        assert!(center.contains(&Pos::new(0, 1)));
        assert!(center.contains(&Pos::new(2, 1)));

        let corner = g.neighbours(Pos::new(0, 0));
        assert_eq!(corner.len(), 2);
    }

    #[test]
    fn interior_excludes_ring() {
        let g = Grid::filled(5, 4, Cell::Wall);
        let interior: Vec<Pos> = g.interior_positions().collect();
        assert_eq!(interior.len(), 3 * 2);
        assert!(interior.iter().all(|&p| !g.is_border(p)));
    }

    #[test]
    fn interior_of_tiny_grid_is_empty() {
        let g = Grid::filled(2, 1, Cell::Wall);
        assert_eq!(g.interior_positions().count(), 0);
    }

    #[test]
    fn from_ascii_parses_walls() {
        let g = Grid::from_ascii(&["###", "#.#", "###"]);
        assert_eq!(g.get(Pos::new(1, 1)), Some(Cell::Path));
        assert_eq!(g.count(Cell::Path), 1);
        assert!(g.border_is_wall());
    }

    #[test]
    fn maze_view_reports_open_cells() {
        let g = Grid::from_ascii(&["#.", ".."]);
        assert!(!g.is_open(Pos::new(0, 0)));
        assert!(g.is_open(Pos::new(1, 0)));
        assert!(!g.is_open(Pos::new(2, 0)));
        assert!(g.pheromone().is_none());
    }
}
