//! Dense pheromone intensity field.

use crate::pos::Pos;

/// A non-negative scalar intensity per grid cell.
///
/// Same shape as the grid it shadows, stored row-major. Every operation
/// preserves `value >= 0`: [`decay`](PheromoneField::decay) multiplies by
/// a rate in `(0, 1)` and [`deposit`](PheromoneField::deposit) ignores
/// non-positive or non-finite amounts.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneField {
    cols: u32,
    rows: u32,
    values: Vec<f32>,
}

impl PheromoneField {
    /// Allocate a zeroed field of `cols * rows` cells.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            values: vec![0.0; (cols as usize) * (rows as usize)],
        }
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

    /// Intensity at `pos`, or `None` if out of bounds.
    pub fn get(&self, pos: Pos) -> Option<f32> {
        self.index(pos).map(|i| self.values[i])
    }

    /// Add `amount` at `pos`, saturating at `cap`.
    ///
    /// Returns the new intensity, or `None` if `pos` is out of bounds.
    /// Non-positive and non-finite amounts leave the cell unchanged.
    pub fn deposit(&mut self, pos: Pos, amount: f32, cap: f32) -> Option<f32> {
        let i = self.index(pos)?;
        let cell = &mut self.values[i];
        if amount.is_finite() && amount > 0.0 {
            *cell = (*cell + amount).min(cap.max(*cell));
        }
        Some(*cell)
    }

    /// Multiply every cell by `rate`.
    pub fn decay(&mut self, rate: f32) {
        for v in &mut self.values {
            *v *= rate;
        }
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    /// Sum of all intensities.
    pub fn total(&self) -> f64 {
        self.values.iter().map(|&v| v as f64).sum()
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
