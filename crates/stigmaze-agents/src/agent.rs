//! A single maze-solving agent and its per-tick state machine.
//!
//! ```text
//!   ACTIVE ──(current_distance == 0)──► GOAL_REACHED (terminal)
//! ```
//!
//! Each [`Agent::step`] call:
//!
//! 1. Cools the temperature from the remaining simulation time.
//! 2. Refreshes the distance to the goal. At distance zero the agent
//!    enters [`AgentStatus::GoalReached`], drops its velocity and stops.
//! 3. Asks its [`MovementPolicy`] for a step.
//! 4. Commits the step if the destination is open, records it as the new
//!    velocity and leaves pheromone at the new position. The deposit is
//!    scaled by the distance from step 2, not the new one. Otherwise the
//!    tick is a bump: velocity resets to [`Step::Stay`] and the agent stays
//!    put.

use std::fmt;

use stigmaze_core::{MazeView, Pos, Step};
use tracing::trace;

use crate::policy::MovementPolicy;
use crate::schedule::TemperatureSchedule;

/// The observable kinematic state a policy decides from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentState {
    /// Current cell.
    pub position: Pos,
    /// Last applied step, [`Step::Stay`] after a bump or at spawn.
    pub velocity: Step,
    /// Target cell.
    pub goal: Pos,
    /// Manhattan distance from spawn to goal.
    pub initial_distance: u32,
    /// Manhattan distance from `position` to goal.
    pub current_distance: u32,
}

impl AgentState {
    /// State of a freshly spawned agent at `spawn`.
    pub fn new(spawn: Pos, goal: Pos) -> Self {
        let d = spawn.manhattan(goal);
        Self {
            position: spawn,
            velocity: Step::Stay,
            goal,
            initial_distance: d,
            current_distance: d,
        }
    }

    /// `true` if `dest` is strictly nearer the goal than the current cell.
    pub fn is_closer_to_goal(&self, dest: Pos) -> bool {
        dest.manhattan(self.goal) < self.position.manhattan(self.goal)
    }

    /// `1 - current/initial`, clamped to `[0, 1]`.
    ///
    /// An agent that spawned on its goal has progress 1.
    pub fn progress(&self) -> f64 {
        if self.initial_distance == 0 {
            return 1.0;
        }
        let p = 1.0 - self.current_distance as f64 / self.initial_distance as f64;
        p.clamp(0.0, 1.0)
    }

    /// `true` if standing on the goal.
    pub fn at_goal(&self) -> bool {
        self.position == self.goal
    }

    fn refresh_distance(&mut self) {
        self.current_distance = self.position.manhattan(self.goal);
    }
}

/// Lifecycle of an agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentStatus {
    /// Still searching.
    #[default]
    Active,
    /// Reached the goal; terminal.
    GoalReached,
}

/// What one [`Agent::step`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to an adjacent open cell.
    Moved,
    /// The policy chose to stay and the current cell is open.
    Stayed,
    /// The chosen destination was blocked; the agent did not move.
    Bumped,
    /// Already at the goal; nothing happened.
    AtGoal,
}

/// An agent navigating a maze under a [`MovementPolicy`].
pub struct Agent {
    id: usize,
    state: AgentState,
    status: AgentStatus,
    schedule: TemperatureSchedule,
    temperature: f64,
    policy: Box<dyn MovementPolicy>,
}

impl Agent {
    /// Spawn an agent at `spawn` heading for `goal`.
    pub fn new(
        id: usize,
        spawn: Pos,
        goal: Pos,
        schedule: TemperatureSchedule,
        policy: Box<dyn MovementPolicy>,
    ) -> Self {
        Self {
            id,
            state: AgentState::new(spawn, goal),
            status: AgentStatus::Active,
            temperature: schedule.initial(),
            schedule,
            policy,
        }
    }

    /// Advance one tick.
    ///
    /// `peers` holds every agent's position at the start of the tick. The
    /// built-in policies ignore it; agents interact only through the
    /// pheromone field.
    pub fn step(
        &mut self,
        maze: &mut dyn MazeView,
        _peers: &[Pos],
        time_remaining: f64,
    ) -> StepOutcome {
        self.temperature = self.schedule.temperature_at(time_remaining);

        self.state.refresh_distance();
        if self.state.current_distance == 0 {
            self.status = AgentStatus::GoalReached;
            self.state.velocity = Step::Stay;
            return StepOutcome::AtGoal;
        }

        let step = self.policy.decide(&self.state, &*maze, self.temperature);
        let candidate = self.state.position.offset(step);

        if !maze.is_open(candidate) {
            self.state.velocity = Step::Stay;
            trace!(agent = self.id, ?step, x = candidate.x, y = candidate.y, "bump");
            return StepOutcome::Bumped;
        }

        self.state.position = candidate;
        self.state.velocity = step;
        let deposited = self.policy.leave_pheromone(&self.state, maze);
        trace!(
            agent = self.id,
            ?step,
            x = candidate.x,
            y = candidate.y,
            distance = self.state.current_distance,
            temperature = self.temperature,
            ?deposited,
            "step"
        );

        if step == Step::Stay {
            StepOutcome::Stayed
        } else {
            StepOutcome::Moved
        }
    }

    /// Agent index within its simulation.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Kinematic state.
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Lifecycle status.
    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Current position.
    pub fn position(&self) -> Pos {
        self.state.position
    }

    /// Current column.
    pub fn x(&self) -> i32 {
        self.state.position.x
    }

    /// Current row.
    pub fn y(&self) -> i32 {
        self.state.position.y
    }

    /// Goal column.
    pub fn goal_x(&self) -> i32 {
        self.state.goal.x
    }

    /// Goal row.
    pub fn goal_y(&self) -> i32 {
        self.state.goal.y
    }

    /// Temperature used on the most recent tick.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// The cooling schedule.
    pub fn schedule(&self) -> &TemperatureSchedule {
        &self.schedule
    }

    /// Name of the driving policy.
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("temperature", &self.temperature)
            .field("policy", &self.policy.name())
            .finish()
    }
}
