//! Synchronous tick loop over a dynamic maze and its agents.
//!
//! [`Simulation`] owns the maze and every agent. Each tick runs:
//!
//! 1. Wall mutation and pheromone decay, when `frame % interval == 0`.
//! 2. One [`Agent::step`] per agent, in spawn order. Deposits land
//!    immediately, so later agents see earlier agents' trail on the same
//!    tick.
//! 3. First-arrival bookkeeping, then the frame counter advances.
//!
//! Time is simulated: [`step_sync`](Simulation::step_sync) derives the
//! remaining time from `frame * dt`. A driver with its own clock can call
//! [`step_at`](Simulation::step_at) with the remaining wall-clock time
//! instead.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stigmaze_agents::{AcoPolicy, Agent};
use stigmaze_core::{ConfigError, MazeView, Pos};
use stigmaze_maze::{DynamicMaze, MutationReport};
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::metrics::{Finish, RunSummary, TickMetrics};

/// Result of a single [`Simulation::step_sync`] or
/// [`Simulation::step_at`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Index of the tick just executed.
    pub tick: u64,
    /// Remaining time the agents cooled against.
    pub time_remaining: f64,
    /// Mutation outcome, if this tick mutated the maze.
    pub mutation: Option<MutationReport>,
    /// Counters and timing for this tick.
    pub metrics: TickMetrics,
}

/// A maze, a colony of agents, and the clock that drives them.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    maze: DynamicMaze,
    agents: Vec<Agent>,
    colony: Pos,
    goal: Pos,
    frame_count: u64,
    finish: Option<Finish>,
    walls_opened: usize,
    walls_closed: usize,
}

/// Stream that carves and mutates the maze.
pub const MAZE_STREAM: u64 = 1;
/// Stream that picks the goal and colony cells.
pub const PLACEMENT_STREAM: u64 = 2;

/// Stream for agent `id`'s policy.
pub fn agent_stream(id: usize) -> u64 {
    PLACEMENT_STREAM + 1 + id as u64
}

/// Seed for an independent random stream derived from the run seed.
///
/// Streams start at 1 so no stream replays the raw run seed.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl Simulation {
    /// Generate a maze from `config`, pick the goal and colony, and spawn
    /// the agents.
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] failure.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut maze = DynamicMaze::new(
            config.maze.width,
            config.maze.height,
            config.maze.mutation_params(),
            derive_seed(config.seed, MAZE_STREAM),
        )?;
        maze.generate();
        Self::with_maze(config, maze)
    }

    /// Run on an existing maze instead of generating one.
    ///
    /// `config.maze` width and height are not consulted; the maze's own
    /// mutation parameters apply. The maze is used as-is, without
    /// regeneration.
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] failure, or
    /// [`ConfigError::NoOpenCell`] if the maze has no room for a goal or
    /// a colony.
    pub fn with_maze(config: SimConfig, maze: DynamicMaze) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = config.schedule()?;

        let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(config.seed, PLACEMENT_STREAM));
        let goal = select_goal(&maze, &mut rng)?;
        let colony = select_colony(&maze, &mut rng)?;

        let mut agents = Vec::with_capacity(config.agent_count);
        for id in 0..config.agent_count {
            let policy = AcoPolicy::new(config.aco, derive_seed(config.seed, agent_stream(id)))?;
            agents.push(Agent::new(id, colony, goal, schedule, Box::new(policy)));
        }

        info!(
            width = maze.width(),
            height = maze.height(),
            agents = config.agent_count,
            colony_x = colony.x,
            colony_y = colony.y,
            goal_x = goal.x,
            goal_y = goal.y,
            seed = config.seed,
            "simulation created"
        );

        Ok(Self {
            config,
            maze,
            agents,
            colony,
            goal,
            frame_count: 0,
            finish: None,
            walls_opened: 0,
            walls_closed: 0,
        })
    }

    /// Remaining simulated time at the current frame, never negative.
    pub fn time_remaining(&self) -> f64 {
        (self.config.simulation_time - self.frame_count as f64 * self.config.dt).max(0.0)
    }

    /// Execute one tick on the simulated clock.
    pub fn step_sync(&mut self) -> TickReport {
        self.step_at(self.time_remaining())
    }

    /// Execute one tick with an externally supplied remaining time.
    ///
    /// `time_remaining` only drives the agents' cooling and the recorded
    /// finish time; it does not stop the simulation.
    pub fn step_at(&mut self, time_remaining: f64) -> TickReport {
        let start = Instant::now();
        let tick = self.frame_count;
        let mut metrics = TickMetrics::default();

        let mutation = if tick % self.config.maze.wall_change_interval == 0 {
            let report = self.maze.update();
            metrics.walls_opened = report.opened;
            metrics.walls_closed = report.closed;
            self.walls_opened += report.opened;
            self.walls_closed += report.closed;
            Some(report)
        } else {
            None
        };

        let peers: Vec<Pos> = self.agents.iter().map(Agent::position).collect();
        for agent in &mut self.agents {
            let outcome = agent.step(&mut self.maze, &peers, time_remaining);
            metrics.record(outcome);
            if self.finish.is_none() && agent.state().at_goal() {
                let finish = Finish {
                    tick,
                    elapsed: (self.config.simulation_time - time_remaining).max(0.0),
                    agent: agent.id(),
                };
                info!(
                    agent = finish.agent,
                    tick = finish.tick,
                    elapsed = finish.elapsed,
                    "goal reached"
                );
                self.finish = Some(finish);
            }
        }

        self.frame_count += 1;
        metrics.pheromone_total = self.maze.pheromone_field().total();
        metrics.total_us = start.elapsed().as_micros() as u64;
        debug!(
            tick,
            moved = metrics.moved,
            bumped = metrics.bumped,
            at_goal = metrics.at_goal,
            pheromone_total = metrics.pheromone_total,
            "tick complete"
        );

        TickReport {
            tick,
            time_remaining,
            mutation,
            metrics,
        }
    }

    /// Step on the simulated clock until the time budget is spent or every
    /// agent stands on the goal.
    pub fn run(&mut self) -> RunSummary {
        let first_tick = self.frame_count;
        while self.frame_count < self.config.max_ticks() && !self.all_at_goal() {
            self.step_sync();
        }
        let summary = self.summary(self.frame_count - first_tick);
        info!(
            ticks = summary.ticks,
            solved = summary.solved(),
            at_goal = summary.agents_at_goal,
            agents = summary.agent_count,
            "run complete"
        );
        summary
    }

    fn summary(&self, ticks: u64) -> RunSummary {
        RunSummary {
            ticks,
            finish: self.finish,
            agents_at_goal: self.agents_at_goal(),
            agent_count: self.agents.len(),
            walls_opened: self.walls_opened,
            walls_closed: self.walls_closed,
            pheromone_total: self.maze.pheromone_field().total(),
        }
    }

    /// Number of agents standing on the goal.
    pub fn agents_at_goal(&self) -> usize {
        self.agents.iter().filter(|a| a.state().at_goal()).count()
    }

    fn all_at_goal(&self) -> bool {
        self.agents.iter().all(|a| a.state().at_goal())
    }

    /// The maze.
    pub fn maze(&self) -> &DynamicMaze {
        &self.maze
    }

    /// Every agent, in spawn order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Shared goal cell.
    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Shared spawn cell.
    pub fn colony(&self) -> Pos {
        self.colony
    }

    /// Ticks executed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// First arrival, once it has happened.
    pub fn finish(&self) -> Option<Finish> {
        self.finish
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// A random open logical cell in the right half (`x >= cols / 2`),
/// falling back to the right-most open interior cell.
fn select_goal<R: Rng>(maze: &DynamicMaze, rng: &mut R) -> Result<Pos, ConfigError> {
    let min_x = (maze.cols() / 2) as i32;
    let candidates: Vec<Pos> = maze
        .maze()
        .logical_cells()
        .filter(|p| p.x >= min_x && maze.is_open(*p))
        .collect();
    if !candidates.is_empty() {
        return Ok(candidates[rng.random_range(0..candidates.len())]);
    }

    let cols = maze.cols() as i32;
    let rows = maze.rows() as i32;
    (1..cols - 1)
        .rev()
        .flat_map(|x| (1..rows - 1).map(move |y| Pos::new(x, y)))
        .find(|p| maze.is_open(*p))
        .ok_or(ConfigError::NoOpenCell { region: "goal" })
}

/// A random open logical cell of the first logical column.
fn select_colony<R: Rng>(maze: &DynamicMaze, rng: &mut R) -> Result<Pos, ConfigError> {
    let candidates: Vec<Pos> = maze
        .maze()
        .logical_cells()
        .filter(|p| p.x == 1 && maze.is_open(*p))
        .collect();
    if candidates.is_empty() {
        return Err(ConfigError::NoOpenCell { region: "colony" });
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}
