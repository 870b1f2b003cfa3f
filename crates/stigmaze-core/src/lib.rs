//! Core types and traits for the Stigmaze maze simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: cell
//! values, grid positions, unit steps, the pheromone field, the
//! [`MazeView`] trait agents navigate through, and configuration errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod field;
pub mod pos;
pub mod traits;

pub use cell::Cell;
pub use error::ConfigError;
pub use field::PheromoneField;
pub use pos::{Pos, Step};
pub use traits::MazeView;
