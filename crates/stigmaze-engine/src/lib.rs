//! Simulation engine orchestrating Stigmaze runs.
//!
//! Provides the [`Simulation`] tick loop that drives a
//! [`DynamicMaze`](stigmaze_maze::DynamicMaze) and a colony of
//! [`Agent`](stigmaze_agents::Agent)s, the validated [`SimConfig`] that
//! describes a run, and per-tick [`TickMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod simulation;

pub use config::{MazeConfig, SimConfig};
pub use metrics::{Finish, RunSummary, TickMetrics};
pub use simulation::{
    agent_stream, derive_seed, Simulation, TickReport, MAZE_STREAM, PLACEMENT_STREAM,
};
