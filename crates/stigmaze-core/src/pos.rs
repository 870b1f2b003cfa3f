//! Grid positions and unit steps.

/// A position on the raw grid.
///
/// `x` is the column and `y` is the row, both zero-based from the
/// top-left corner. Coordinates are signed so that a position one step
/// past the border can be represented and rejected by bounds checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Pos {
    /// Construct a position from column `x` and row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position reached by applying `step` once.
    pub fn offset(self, step: Step) -> Self {
        let (dx, dy) = step.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if both coordinates are odd, i.e. this is a logical maze
    /// cell rather than a wall slot.
    pub fn is_logical(self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }
}

/// A unit move on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Step {
    /// No movement.
    #[default]
    Stay = 0,
    /// One row down (`y + 1`).
    Down = 1,
    /// One column right (`x + 1`).
    Right = 2,
    /// One row up (`y - 1`).
    Up = 3,
    /// One column left (`x - 1`).
    Left = 4,
}

impl Step {
    /// The four cardinal steps in candidate enumeration order.
    ///
    /// As `(dx, dy)`: `(0,1)`, `(1,0)`, `(0,-1)`, `(-1,0)`. Score ties are
    /// broken in favour of the earlier entry, so seeded runs depend on
    /// this order staying fixed.
    pub const CARDINALS: [Step; 4] = [Step::Down, Step::Right, Step::Up, Step::Left];

    /// Returns the `(dx, dy)` offset for this step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Step::Stay => (0, 0),
            Step::Down => (0, 1),
            Step::Right => (1, 0),
            Step::Up => (0, -1),
            Step::Left => (-1, 0),
        }
    }

    /// The step that undoes this one. `Stay` reverses to itself.
    pub fn reverse(self) -> Self {
        match self {
            Step::Stay => Step::Stay,
            Step::Down => Step::Up,
            Step::Right => Step::Left,
            Step::Up => Step::Down,
            Step::Left => Step::Right,
        }
    }

    /// `true` if taking `self` would exactly undo `previous`.
    ///
    /// `Stay` is never a backtrack, and nothing backtracks a `Stay`.
    pub fn is_reverse_of(self, previous: Step) -> bool {
        self != Step::Stay && previous != Step::Stay && self == previous.reverse()
    }
}
