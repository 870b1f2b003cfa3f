//! A maze whose walls drift over time and which carries a pheromone field.
//!
//! [`DynamicMaze`] embeds a [`MazeGrid`] and adds:
//!
//! - a [`PheromoneField`] of the same shape, decayed by a constant
//!   evaporation rate on every [`update`](DynamicMaze::update);
//! - a wall-mutation pass over every interior non-logical cell. A wall
//!   opens with probability `p`. An open cell closes with probability `p`
//!   only if all four of its neighbours are open, so a single closure
//!   never isolates a neighbour. Nothing prevents chains of closures from
//!   disconnecting the maze, and openings may create cycles: the dynamic
//!   maze is not required to stay perfect.
//!
//! The outer ring is excluded from iteration, so it is immutable.
//! Logical `(odd, odd)` cells are excluded too and stay open.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stigmaze_core::{Cell, ConfigError, MazeView, PheromoneField, Pos};
use tracing::debug;

use crate::grid::Grid;
use crate::perfect::MazeGrid;

/// Evaporation rate used by [`MutationParams::default`].
pub const DEFAULT_EVAPORATION_RATE: f64 = 0.85;

/// Tunables for wall mutation and pheromone decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MutationParams {
    /// Per-update, per-cell toggle probability, in `[0, 1]`. Default: 0.01.
    pub change_probability: f64,
    /// Multiplier applied to every pheromone cell per update, in `(0, 1)`.
    /// Default: 0.85.
    pub evaporation_rate: f64,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            change_probability: 0.01,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
        }
    }
}

impl MutationParams {
    /// Check both parameters against their valid ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("change_probability", self.change_probability)?;
        ConfigError::check_open_rate("evaporation_rate", self.evaporation_rate)?;
        Ok(())
    }
}

/// Outcome of one [`DynamicMaze::update`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationReport {
    /// Walls turned into paths.
    pub opened: usize,
    /// Paths turned into walls.
    pub closed: usize,
}

impl MutationReport {
    /// `true` if any cell changed.
    pub fn changed(&self) -> bool {
        self.opened + self.closed > 0
    }
}

/// A mutable maze with a decaying pheromone field.
#[derive(Clone, Debug)]
pub struct DynamicMaze {
    maze: MazeGrid,
    pheromone: PheromoneField,
    params: MutationParams,
    changeable_walls: Vec<Pos>,
    rng: ChaCha8Rng,
}

impl DynamicMaze {
    /// Create an all-wall dynamic maze of `width x height` logical cells.
    ///
    /// `seed` drives both [`generate`](DynamicMaze::generate) and
    /// [`update`](DynamicMaze::update).
    ///
    /// # Errors
    ///
    /// Fails if the dimensions are zero or either parameter is out of range.
    pub fn new(
        width: u32,
        height: u32,
        params: MutationParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        let maze = MazeGrid::new(width, height)?;
        Ok(Self::assemble(maze, params, seed))
    }

    /// Wrap a hand-built grid, e.g. an open room for tests.
    ///
    /// The changeable-wall list is computed immediately.
    pub fn from_grid(grid: Grid, params: MutationParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut maze = Self::assemble(MazeGrid::from_grid(grid), params, seed);
        maze.refresh_changeable_walls();
        Ok(maze)
    }

    fn assemble(maze: MazeGrid, params: MutationParams, seed: u64) -> Self {
        let grid = maze.grid();
        let pheromone = PheromoneField::new(grid.cols(), grid.rows());
        Self {
            maze,
            pheromone,
            params,
            changeable_walls: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Carve a perfect maze, clear the pheromone field, and record the
    /// changeable walls.
    pub fn generate(&mut self) -> &Grid {
        self.maze.generate(&mut self.rng);
        self.pheromone.clear();
        self.refresh_changeable_walls();
        self.maze.grid()
    }

    /// Recompute [`changeable_walls`](DynamicMaze::changeable_walls) from
    /// the current layout.
    ///
    /// Called once by [`generate`](DynamicMaze::generate); the list is not
    /// kept in sync with later mutations.
    pub fn refresh_changeable_walls(&mut self) {
        let grid = self.maze.grid();
        self.changeable_walls = grid
            .interior_positions()
            .filter(|p| !p.is_logical())
            .filter(|&p| grid.get(p) == Some(Cell::Wall))
            .collect();
    }

    /// One mutation tick: toggle walls, then decay the pheromone field.
    ///
    /// Decay is applied regardless of whether any wall changed.
    pub fn update(&mut self) -> MutationReport {
        let mut report = MutationReport::default();
        let p = self.params.change_probability;
        let cols = self.maze.grid().cols() as i32;
        let rows = self.maze.grid().rows() as i32;

        for y in 1..rows - 1 {
            for x in 1..cols - 1 {
                let pos = Pos::new(x, y);
                if pos.is_logical() {
                    continue;
                }
                if self.rng.random::<f64>() >= p {
                    continue;
                }
                let grid = self.maze.grid_mut();
                let Some(cell) = grid.get(pos) else {
                    continue;
                };
                // A path only closes when all four neighbours are open.
                if cell == Cell::Path
                    && !grid
                        .neighbours(pos)
                        .iter()
                        .all(|&n| grid.get(n) == Some(Cell::Path))
                {
                    continue;
                }
                grid.set(pos, cell.toggled());
                match cell {
                    Cell::Wall => report.opened += 1,
                    Cell::Path => report.closed += 1,
                }
            }
        }

        self.pheromone.decay(self.params.evaporation_rate as f32);

        debug!(
            opened = report.opened,
            closed = report.closed,
            pheromone_total = self.pheromone.total(),
            "maze update"
        );
        report
    }

    /// Interior non-logical cells that were walls when last refreshed.
    pub fn changeable_walls(&self) -> &[Pos] {
        &self.changeable_walls
    }

    /// The current cell grid.
    pub fn grid(&self) -> &Grid {
        self.maze.grid()
    }

    /// The embedded static maze.
    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    /// The pheromone field.
    pub fn pheromone_field(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// Mutable access to the pheromone field.
    pub fn pheromone_field_mut(&mut self) -> &mut PheromoneField {
        &mut self.pheromone
    }

    /// Mutation and decay parameters.
    pub fn params(&self) -> MutationParams {
        self.params
    }

    /// Logical width `W`.
    pub fn width(&self) -> u32 {
        self.maze.width()
    }

    /// Logical height `H`.
    pub fn height(&self) -> u32 {
        self.maze.height()
    }

    /// Forwarded from [`MazeGrid::is_perfect`]. Only meaningful before the
    /// first mutation.
    pub fn is_perfect(&self) -> bool {
        self.maze.is_perfect()
    }
}

impl MazeView for DynamicMaze {
    fn cols(&self) -> u32 {
        self.maze.grid().cols()
    }

    fn rows(&self) -> u32 {
        self.maze.grid().rows()
    }

    fn cell(&self, pos: Pos) -> Option<Cell> {
        self.maze.grid().get(pos)
    }

    fn pheromone(&self) -> Option<&PheromoneField> {
        Some(&self.pheromone)
    }

    fn pheromone_mut(&mut self) -> Option<&mut PheromoneField> {
        Some(&mut self.pheromone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volatile(seed: u64) -> DynamicMaze {
        let params = MutationParams {
            change_probability: 1.0,
            ..MutationParams::default()
        };
        let mut m = DynamicMaze::new(5, 5, params, seed).unwrap();
        m.generate();
        m
    }

    fn frozen_open(cols: u32, rows: u32) -> DynamicMaze {
        let params = MutationParams {
            change_probability: 0.0,
            ..MutationParams::default()
        };
        DynamicMaze::from_grid(Grid::filled(cols, rows, Cell::Path), params, 0).unwrap()
    }

    #[test]
    fn invalid_params_rejected() {
        let bad_p = MutationParams {
            change_probability: 1.5,
            ..MutationParams::default()
        };
        assert!(matches!(
            DynamicMaze::new(5, 5, bad_p, 0),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));

        let bad_r = MutationParams {
            evaporation_rate: 1.0,
            ..MutationParams::default()
        };
        assert!(matches!(
            DynamicMaze::new(5, 5, bad_r, 0),
            Err(ConfigError::RateOutOfRange { .. })
        ));

        assert!(matches!(
            DynamicMaze::new(0, 5, MutationParams::default(), 0),
            Err(ConfigError::EmptyMaze { .. })
        ));
    }

    #[test]
    fn changeable_walls_are_interior() {
        let m = volatile(3);
        assert!(!m.changeable_walls().is_empty());
        for p in m.changeable_walls() {
            assert!(p.x > 0 && p.x < 10, "{p:?}");
            assert!(p.y > 0 && p.y < 10, "{p:?}");
            assert!(!p.is_logical());
            assert_eq!(m.grid().get(*p), Some(Cell::Wall));
        }
    }

    #[test]
    fn changeable_walls_are_a_snapshot() {
        let mut m = volatile(6);
        let before = m.changeable_walls().to_vec();
        m.update();
        assert_eq!(m.changeable_walls(), &before[..]);
        // Every listed wall was opened at p = 1, yet the list still names it.
        assert!(before.iter().all(|&p| m.grid().get(p) == Some(Cell::Path)));

        m.refresh_changeable_walls();
        assert_ne!(m.changeable_walls(), &before[..]);
    }

    #[test]
    fn full_probability_update_changes_interior_but_not_border() {
        let mut m = volatile(9);
        let before = m.grid().clone();
        let report = m.update();
        assert!(report.changed());
        assert_ne!(&before, m.grid());
        assert!(m.grid().border_is_wall());
    }

    #[test]
    fn border_survives_many_updates() {
        let mut m = volatile(21);
        for _ in 0..20 {
            m.update();
            assert!(m.grid().border_is_wall());
        }
    }

    #[test]
    fn logical_cells_never_close() {
        let mut m = volatile(4);
        for _ in 0..10 {
            m.update();
        }
        assert!(m.is_perfect());
    }

    #[test]
    fn zero_probability_leaves_walls_alone() {
        let params = MutationParams {
            change_probability: 0.0,
            ..MutationParams::default()
        };
        let mut m = DynamicMaze::new(6, 4, params, 8).unwrap();
        m.generate();
        let before = m.grid().clone();
        let report = m.update();
        assert_eq!(report, MutationReport::default());
        assert_eq!(&before, m.grid());
    }

    #[test]
    fn enclosed_path_cell_closes() {
        // Centre slot of an open room: all four neighbours are open.
        let params = MutationParams {
            change_probability: 1.0,
            ..MutationParams::default()
        };
        let grid = Grid::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let mut m = DynamicMaze::from_grid(grid, params, 0).unwrap();
        let report = m.update();
        // (2,1) is visited first, its neighbour (2,0) is border wall: stays open.
        assert_eq!(m.grid().get(Pos::new(2, 1)), Some(Cell::Path));
        // (2,2) has four open neighbours: closes.
        assert_eq!(m.grid().get(Pos::new(2, 2)), Some(Cell::Wall));
        assert_eq!(report.opened, 0);
        assert_eq!(report.closed, 1);
    }

    #[test]
    fn decay_without_deposits_is_geometric() {
        let mut m = frozen_open(5, 5);
        let rate = m.params().evaporation_rate;
        m.pheromone_field_mut().deposit(Pos::new(1, 1), 0.8, 1.0);
        m.pheromone_field_mut().deposit(Pos::new(3, 2), 0.25, 1.0);
        let n = 7;
        for _ in 0..n {
            m.update();
        }
        let expected_a = 0.8 * rate.powi(n);
        let expected_b = 0.25 * rate.powi(n);
        let a = m.pheromone_field().get(Pos::new(1, 1)).unwrap() as f64;
        let b = m.pheromone_field().get(Pos::new(3, 2)).unwrap() as f64;
        assert!((a - expected_a).abs() < 1e-5, "{a} vs {expected_a}");
        assert!((b - expected_b).abs() < 1e-5, "{b} vs {expected_b}");
        assert_eq!(m.pheromone_field().get(Pos::new(2, 2)), Some(0.0));
    }

    #[test]
    fn generate_clears_pheromone() {
        let mut m = volatile(1);
        m.pheromone_field_mut().deposit(Pos::new(1, 1), 1.0, 1.0);
        m.generate();
        assert_eq!(m.pheromone_field().total(), 0.0);
    }

    #[test]
    fn exposes_pheromone_through_view() {
        let mut m = frozen_open(3, 3);
        assert!(m.pheromone().is_some());
        m.pheromone_mut()
            .unwrap()
            .deposit(Pos::new(1, 1), 0.5, 1.0);
        assert_eq!(m.pheromone_field().get(Pos::new(1, 1)), Some(0.5));
    }

    #[test]
    fn same_seed_same_mutations() {
        let run = |seed| {
            let mut m = volatile(seed);
            let params = MutationParams {
                change_probability: 0.3,
                ..MutationParams::default()
            };
            m.params = params;
            for _ in 0..5 {
                m.update();
            }
            m.grid().clone()
        };
        assert_eq!(run(77), run(77));
    }
}
