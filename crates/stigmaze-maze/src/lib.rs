//! Maze storage, generation, and mutation for Stigmaze.
//!
//! # Layers
//!
//! - [`Grid`]: dense row-major array of [`Cell`](stigmaze_core::Cell)s.
//! - [`MazeGrid`]: a `(2H+1) x (2W+1)` grid carved into a perfect maze
//!   by randomized depth-first search.
//! - [`DynamicMaze`]: a `MazeGrid` plus a decaying pheromone field and a
//!   probabilistic wall-mutation process.
//!
//! All three implement [`MazeView`](stigmaze_core::MazeView); only
//! `DynamicMaze` exposes a pheromone field through it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dynamic;
pub mod grid;
pub mod perfect;

pub use dynamic::{DynamicMaze, MutationParams, MutationReport, DEFAULT_EVAPORATION_RATE};
pub use grid::Grid;
pub use perfect::MazeGrid;
