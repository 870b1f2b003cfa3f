//! Perfect-maze generation by randomized depth-first carving.
//!
//! A `W x H` logical maze is stored in a `(2W+1) x (2H+1)` [`Grid`].
//! Logical cells sit at odd `(x, y)`; the cells between them are wall
//! slots that the carver opens to join two logical cells. The outer ring
//! is never carved.
//!
//! Carving starts at `(1, 1)` and walks a stack:
//!
//! 1. Peek the top cell and collect its unvisited logical neighbours two
//!    steps away, restricted to the interior.
//! 2. No candidates: pop and backtrack.
//! 3. Otherwise pick one uniformly, open the wall slot midway, mark the
//!    neighbour as path, and push it.
//!
//! Each logical cell is reached exactly once through exactly one carved
//! slot, so the passages form a spanning tree over the logical cells.

use rand::Rng;
use smallvec::SmallVec;
use stigmaze_core::{Cell, ConfigError, MazeView, Pos};
use tracing::debug;

use crate::grid::Grid;

/// A maze of `width x height` logical cells on a `(2W+1) x (2H+1)` grid.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    grid: Grid,
}

impl MazeGrid {
    /// Largest logical dimension whose grid still fits `i32` coordinates.
    pub const MAX_DIM: u32 = (i32::MAX as u32 - 1) / 2;

    /// Create an all-wall maze of `width x height` logical cells.
    ///
    /// Call [`generate`](MazeGrid::generate) to carve it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyMaze`] if either dimension is zero,
    /// [`ConfigError::MazeTooLarge`] if either exceeds [`MAX_DIM`](Self::MAX_DIM).
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyMaze { width, height });
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(ConfigError::MazeTooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            grid: Grid::filled(width * 2 + 1, height * 2 + 1, Cell::Wall),
        })
    }

    /// Wrap an existing grid.
    ///
    /// Logical dimensions are derived as `(cols - 1) / 2` and
    /// `(rows - 1) / 2`, so hand-built grids that do not follow the
    /// odd-cell layout still work as plain mazes.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            width: grid.cols().saturating_sub(1) / 2,
            height: grid.rows().saturating_sub(1) / 2,
            grid,
        }
    }

    /// Logical width `W`.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height `H`.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The underlying cell grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Carve a fresh perfect maze, discarding any previous layout.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> &Grid {
        self.grid.fill(Cell::Wall);

        let start = Pos::new(1, 1);
        self.grid.set(start, Cell::Path);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates = self.unvisited_neighbours(current);
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let next = candidates[rng.random_range(0..candidates.len())];
            let wall = Pos::new((current.x + next.x) / 2, (current.y + next.y) / 2);
            self.grid.set(wall, Cell::Path);
            self.grid.set(next, Cell::Path);
            stack.push(next);
        }

        debug!(
            width = self.width,
            height = self.height,
            passages = self.carved_passages(),
            "generated perfect maze"
        );
        &self.grid
    }

    /// Logical neighbours two steps away that are inside the interior and
    /// still walled (unvisited).
    fn unvisited_neighbours(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        let max_x = (self.width * 2) as i32;
        let max_y = (self.height * 2) as i32;
        let offsets: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];
        let mut result = SmallVec::new();
        for (dx, dy) in offsets {
            let n = Pos::new(pos.x + dx, pos.y + dy);
            if n.x > 0
                && n.x < max_x
                && n.y > 0
                && n.y < max_y
                && self.grid.get(n) == Some(Cell::Wall)
            {
                result.push(n);
            }
        }
        result
    }

    /// Row-major iterator over the logical cell positions `(odd, odd)`.
    pub fn logical_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width as i32;
        (0..self.height as i32)
            .flat_map(move |j| (0..width).map(move |i| Pos::new(2 * i + 1, 2 * j + 1)))
    }

    /// Sanity check: every logical cell is open.
    ///
    /// This counts open `(odd, odd)` cells and compares against `W * H`.
    /// It catches skipped cells but does not detect cycles; use
    /// [`carved_passages`](MazeGrid::carved_passages) for the tree-edge
    /// count.
    pub fn is_perfect(&self) -> bool {
        let open = self
            .logical_cells()
            .filter(|&p| self.grid.get(p) == Some(Cell::Path))
            .count();
        open == (self.width as usize) * (self.height as usize)
    }

    /// Number of open wall slots joining two logical cells.
    ///
    /// A freshly generated maze has exactly `W * H - 1` (spanning tree).
    pub fn carved_passages(&self) -> usize {
        self.grid
            .interior_positions()
            .filter(|p| (p.x % 2 == 0) != (p.y % 2 == 0))
            .filter(|&p| self.grid.get(p) == Some(Cell::Path))
            .count()
    }
}

impl MazeView for MazeGrid {
    fn cols(&self) -> u32 {
        self.grid.cols()
    }

    fn rows(&self) -> u32 {
        self.grid.rows()
    }

    fn cell(&self, pos: Pos) -> Option<Cell> {
        self.grid.get(pos)
    }
}
