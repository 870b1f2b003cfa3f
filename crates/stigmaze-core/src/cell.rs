//! Binary cell values.

/// The content of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable. Freshly allocated grids are all walls.
    #[default]
    Wall,
    /// Open floor an agent may stand on.
    Path,
}

impl Cell {
    /// Returns `true` for [`Cell::Wall`].
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Returns `true` for [`Cell::Path`].
    pub fn is_path(self) -> bool {
        matches!(self, Cell::Path)
    }

    /// The opposite cell value.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Wall => Cell::Path,
            Cell::Path => Cell::Wall,
        }
    }
}
