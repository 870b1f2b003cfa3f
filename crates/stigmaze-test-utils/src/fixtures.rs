//! Reusable maze and policy fixtures.
//!
//! Mazes:
//!
//! - [`open_room`]: a [`DynamicMaze`] with no interior walls and frozen
//!   mutation.
//! - [`boxed_in`]: a single open cell surrounded by walls.
//! - [`generated`]: a freshly carved perfect maze.
//!
//! Policies:
//!
//! - [`ScriptedPolicy`]: replays a fixed list of steps, then stays.
//! - [`DepositingPolicy`]: always picks the same step and deposits a
//!   constant amount.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stigmaze_agents::{AgentState, MovementPolicy};
use stigmaze_core::{Cell, MazeView, Step};
use stigmaze_maze::{DynamicMaze, Grid, MutationParams};

/// Mutation parameters that never toggle a wall.
pub fn frozen_params() -> MutationParams {
    MutationParams {
        change_probability: 0.0,
        ..MutationParams::default()
    }
}

/// `cols x rows` dynamic maze with every cell open and mutation disabled.
pub fn open_room(cols: u32, rows: u32) -> DynamicMaze {
    DynamicMaze::from_grid(Grid::filled(cols, rows, Cell::Path), frozen_params(), 0)
        .expect("frozen params are valid")
}

/// 3x3 dynamic maze whose only open cell is `(1, 1)`.
pub fn boxed_in() -> DynamicMaze {
    DynamicMaze::from_grid(Grid::from_ascii(&["###", "#.#", "###"]), frozen_params(), 0)
        .expect("frozen params are valid")
}

/// Freshly generated `width x height` dynamic maze.
pub fn generated(width: u32, height: u32, params: MutationParams, seed: u64) -> DynamicMaze {
    let mut maze = DynamicMaze::new(width, height, params, seed).expect("valid test maze");
    maze.generate();
    maze
}

/// Replays a scripted sequence of steps, then returns [`Step::Stay`].
///
/// The call counter is shared through [`calls_handle`](Self::calls_handle)
/// so it stays observable after the policy is boxed into an agent.
pub struct ScriptedPolicy {
    script: Vec<Step>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedPolicy {
    pub fn new(script: impl Into<Vec<Step>>) -> Self {
        Self {
            script: script.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `decide()` calls.
    pub fn calls_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl MovementPolicy for ScriptedPolicy {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _agent: &AgentState, _maze: &dyn MazeView, _temperature: f64) -> Step {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        self.script.get(n).copied().unwrap_or(Step::Stay)
    }
}

/// Always picks `step` and deposits `amount` uncapped after each move.
pub struct DepositingPolicy {
    pub step: Step,
    pub amount: f32,
}

impl DepositingPolicy {
    pub fn new(step: Step, amount: f32) -> Self {
        Self { step, amount }
    }
}

impl MovementPolicy for DepositingPolicy {
    fn name(&self) -> &str {
        "depositing"
    }

    fn decide(&mut self, _agent: &AgentState, _maze: &dyn MazeView, _temperature: f64) -> Step {
        self.step
    }

    fn leave_pheromone(&mut self, agent: &AgentState, maze: &mut dyn MazeView) -> Option<f32> {
        maze.pheromone_mut()?
            .deposit(agent.position, self.amount, f32::MAX)
    }
}
