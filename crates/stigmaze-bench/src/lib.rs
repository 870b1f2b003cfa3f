//! Benchmark profiles for the Stigmaze simulation.
//!
//! - [`reference_profile`]: the default 15x12 maze with 6 agents.
//! - [`stress_profile`]: a 64x64 maze with 64 agents and frequent
//!   mutation.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stigmaze_engine::{MazeConfig, SimConfig};

/// The default run: 15x12 maze, 6 agents, mutation every 60 ticks.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        ..SimConfig::default()
    }
}

/// 64x64 maze (16.9K grid cells), 64 agents, mutation every 10 ticks.
pub fn stress_profile(seed: u64) -> SimConfig {
    SimConfig {
        maze: MazeConfig {
            width: 64,
            height: 64,
            wall_change_interval: 10,
            ..MazeConfig::default()
        },
        agent_count: 64,
        simulation_time: 60.0,
        seed,
        ..SimConfig::default()
    }
}
