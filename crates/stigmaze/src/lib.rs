//! Stigmaze: ant-colony agents solving perfect mazes whose walls drift
//! over time.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Stigmaze sub-crates. For most users, adding `stigmaze` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use stigmaze::prelude::*;
//!
//! let mut config = SimConfig {
//!     seed: 7,
//!     agent_count: 2,
//!     ..SimConfig::default()
//! };
//! config.maze.width = 8;
//! config.maze.height = 6;
//!
//! let mut sim = Simulation::new(config).unwrap();
//! let tick = sim.step_sync();
//! assert_eq!(tick.tick, 0);
//!
//! let summary = sim.run();
//! assert_eq!(summary.agent_count, 2);
//! assert!(sim.frame_count() <= config.max_ticks());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stigmaze-core` | Cells, positions, steps, pheromone field, `MazeView`, errors |
//! | [`maze`] | `stigmaze-maze` | Grid storage, perfect-maze generation, dynamic maze |
//! | [`agents`] | `stigmaze-agents` | Agents, movement policies, temperature schedule |
//! | [`engine`] | `stigmaze-engine` | Configuration, tick loop, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`stigmaze-core`).
///
/// [`types::Cell`], [`types::Pos`], [`types::Step`], the
/// [`types::PheromoneField`], the [`types::MazeView`] trait, and
/// [`types::ConfigError`].
pub use stigmaze_core as types;

/// Maze storage and generation (`stigmaze-maze`).
///
/// [`maze::MazeGrid`] carves perfect mazes; [`maze::DynamicMaze`] adds
/// wall drift and a decaying pheromone field.
pub use stigmaze_maze as maze;

/// Agents and movement policies (`stigmaze-agents`).
///
/// [`agents::MovementPolicy`] is the main extension point for custom
/// navigation logic.
pub use stigmaze_agents as agents;

/// Simulation engine (`stigmaze-engine`).
pub use stigmaze_engine as engine;

/// Common imports for typical Stigmaze usage.
///
/// ```rust
/// use stigmaze::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use stigmaze_core::{Cell, ConfigError, MazeView, PheromoneField, Pos, Step};

    // Mazes
    pub use stigmaze_maze::{DynamicMaze, Grid, MazeGrid, MutationParams, MutationReport};

    // Agents
    pub use stigmaze_agents::{
        AcoParams, AcoPolicy, Agent, AgentState, MovementPolicy, StepOutcome, TemperatureSchedule,
    };

    // Engine
    pub use stigmaze_engine::{
        MazeConfig, RunSummary, SimConfig, Simulation, TickMetrics, TickReport,
    };
}
