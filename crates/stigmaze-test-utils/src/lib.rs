//! Test utilities and mock types for Stigmaze development.
//!
//! Provides a [`MockMaze`] implementing [`MazeView`] with hand-placed
//! walls and an optional pheromone field, plus reusable maze and policy
//! fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stigmaze_core::{Cell, MazeView, PheromoneField, Pos};

/// Deterministic RNG for tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Mock implementation of [`MazeView`].
///
/// Starts fully open. Place walls with [`block`](MockMaze::block) and
/// attach a field with [`with_pheromone`](MockMaze::with_pheromone) to
/// exercise the scoring path instead of the random fallback.
#[derive(Clone, Debug)]
pub struct MockMaze {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
    pheromone: Option<PheromoneField>,
}

impl MockMaze {
    pub fn open(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Path; cols as usize * rows as usize],
            pheromone: None,
        }
    }

    /// Attach a zeroed pheromone field.
    pub fn with_pheromone(mut self) -> Self {
        self.pheromone = Some(PheromoneField::new(self.cols, self.rows));
        self
    }

    /// Turn `pos` into a wall. Out-of-bounds positions are ignored.
    pub fn block(mut self, pos: Pos) -> Self {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Cell::Wall;
        }
        self
    }

    /// Set the pheromone at `pos`, attaching a field if needed.
    pub fn scent(mut self, pos: Pos, value: f32) -> Self {
        let (cols, rows) = (self.cols, self.rows);
        let field = self
            .pheromone
            .get_or_insert_with(|| PheromoneField::new(cols, rows));
        field.deposit(pos, value, f32::MAX);
        self
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols as i32 || pos.y >= self.rows as i32 {
            return None;
        }
        Some(pos.y as usize * self.cols as usize + pos.x as usize)
    }
}

impl MazeView for MockMaze {
    fn cols(&self) -> u32 {
        self.cols
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cell(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    fn pheromone(&self) -> Option<&PheromoneField> {
        self.pheromone.as_ref()
    }

    fn pheromone_mut(&mut self) -> Option<&mut PheromoneField> {
        self.pheromone.as_mut()
    }
}
