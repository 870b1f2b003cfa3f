//! Simulation configuration and validation.
//!
//! [`SimConfig`] enumerates every tunable of a run. [`SimConfig::validate`]
//! checks them in a fixed order and reports the first violation, so a
//! misconfigured run fails at construction instead of drifting into
//! nonsense at tick 500.

use stigmaze_agents::{AcoParams, TemperatureSchedule};
use stigmaze_core::ConfigError;
use stigmaze_maze::MutationParams;

/// Maze shape and mutation schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    /// Logical width `W` (grid is `2W+1` columns). Default: 15.
    pub width: u32,
    /// Logical height `H` (grid is `2H+1` rows). Default: 12.
    pub height: u32,
    /// Per-cell toggle probability on a mutation tick, in `[0, 1]`.
    /// Default: 0.03.
    pub wall_change_probability: f64,
    /// Ticks between mutations; mutation runs when
    /// `frame % interval == 0`. Default: 60.
    pub wall_change_interval: u64,
    /// Pheromone multiplier per mutation tick, in `(0, 1)`. Default: 0.85.
    pub evaporation_rate: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 12,
            wall_change_probability: 0.03,
            wall_change_interval: 60,
            evaporation_rate: stigmaze_maze::DEFAULT_EVAPORATION_RATE,
        }
    }
}

impl MazeConfig {
    /// Mutation parameters for the dynamic maze.
    pub fn mutation_params(&self) -> MutationParams {
        MutationParams {
            change_probability: self.wall_change_probability,
            evaporation_rate: self.evaporation_rate,
        }
    }
}

/// Complete configuration of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Maze shape and mutation schedule.
    pub maze: MazeConfig,
    /// Movement policy weights.
    pub aco: AcoParams,
    /// Temperature at the start of the run. Default: 1.0.
    pub initial_temperature: f64,
    /// Temperature floor. Default: 0.01.
    pub min_temperature: f64,
    /// Run length in simulated seconds. Default: 20.
    pub simulation_time: f64,
    /// Number of agents spawned at the colony. Default: 6.
    pub agent_count: usize,
    /// Simulated seconds per tick. Default: 1/15.
    pub dt: f64,
    /// Seed for the maze, placement, and every agent's policy.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            aco: AcoParams {
                pheromone_influence: 0.3,
                ..AcoParams::default()
            },
            initial_temperature: 1.0,
            min_temperature: 0.01,
            simulation_time: 20.0,
            agent_count: 6,
            dt: 1.0 / 15.0,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Maze must have at least one logical cell.
        if self.maze.width == 0 || self.maze.height == 0 {
            return Err(ConfigError::EmptyMaze {
                width: self.maze.width,
                height: self.maze.height,
            });
        }
        // 2. Mutation parameters.
        self.maze.mutation_params().validate()?;
        // 3. Mutation interval >= 1.
        if self.maze.wall_change_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        // 4. Policy weights.
        self.aco.validate()?;
        // 5. Temperature schedule over the run length.
        self.schedule()?;
        // 6. At least one agent.
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        // 7. dt must be positive and finite.
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        Ok(())
    }

    /// The cooling schedule shared by every agent.
    pub fn schedule(&self) -> Result<TemperatureSchedule, ConfigError> {
        TemperatureSchedule::new(
            self.initial_temperature,
            self.min_temperature,
            self.simulation_time,
        )
    }

    /// Number of ticks [`Simulation::run`](crate::Simulation::run) takes
    /// to exhaust the time budget.
    pub fn max_ticks(&self) -> u64 {
        (self.simulation_time / self.dt).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_ticks(), 300);
        assert_eq!(cfg.aco.pheromone_influence, 0.3);
        assert_eq!(cfg.aco.goal_influence, 5.0);
    }

    #[test]
    fn zero_width_fails() {
        let mut cfg = SimConfig::default();
        cfg.maze.width = 0;
        match cfg.validate() {
            Err(ConfigError::EmptyMaze { width: 0, height: 12 }) => {}
            other => panic!("expected EmptyMaze, got {other:?}"),
        }
    }

    #[test]
    fn probability_out_of_range_fails() {
        let mut cfg = SimConfig::default();
        cfg.maze.wall_change_probability = 1.5;
        match cfg.validate() {
            Err(ConfigError::ProbabilityOutOfRange { name, .. }) => {
                assert_eq!(name, "change_probability");
            }
            other => panic!("expected ProbabilityOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn zero_interval_fails() {
        let mut cfg = SimConfig::default();
        cfg.maze.wall_change_interval = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn no_agents_fails() {
        let cfg = SimConfig {
            agent_count: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoAgents));
    }

    #[test]
    fn invalid_dt_fails() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig {
                dt,
                ..SimConfig::default()
            };
            match cfg.validate() {
                Err(ConfigError::InvalidDt { .. }) => {}
                other => panic!("expected InvalidDt for {dt}, got {other:?}"),
            }
        }
    }

    #[test]
    fn inverted_temperatures_fail() {
        let cfg = SimConfig {
            initial_temperature: 0.001,
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTemperature { .. }) => {}
            other => panic!("expected InvalidTemperature, got {other:?}"),
        }
    }

    #[test]
    fn bad_policy_weight_fails() {
        let mut cfg = SimConfig::default();
        cfg.aco.backtrack_penalty = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn mutation_params_mirror_maze_config() {
        let cfg = MazeConfig::default();
        let p = cfg.mutation_params();
        assert_eq!(p.change_probability, 0.03);
        assert_eq!(p.evaporation_rate, 0.85);
    }
}
