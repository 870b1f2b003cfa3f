//! The maze abstraction agents navigate through.

use crate::cell::Cell;
use crate::field::PheromoneField;
use crate::pos::Pos;

/// Read access to a maze grid plus optional pheromone storage.
///
/// Movement policies and agents only ever see a maze through this trait.
/// Out-of-bounds queries are not errors: [`cell`](MazeView::cell) returns
/// `None` and [`is_open`](MazeView::is_open) returns `false`.
///
/// Implementations without a pheromone field return `None` from
/// [`pheromone`](MazeView::pheromone); policies fall back to an
/// unbiased random walk in that case.
pub trait MazeView {
    /// Number of grid columns (`2W + 1` for a generated maze).
    fn cols(&self) -> u32;

    /// Number of grid rows (`2H + 1` for a generated maze).
    fn rows(&self) -> u32;

    /// The cell at `pos`, or `None` outside the grid.
    fn cell(&self, pos: Pos) -> Option<Cell>;

    /// `true` iff `pos` is in bounds and not a wall.
    fn is_open(&self, pos: Pos) -> bool {
        self.cell(pos) == Some(Cell::Path)
    }

    /// The pheromone field, if this maze carries one.
    fn pheromone(&self) -> Option<&PheromoneField> {
        None
    }

    /// Mutable pheromone field, if this maze carries one.
    fn pheromone_mut(&mut self) -> Option<&mut PheromoneField> {
        None
    }
}
