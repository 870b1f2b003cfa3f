//! Per-tick and per-run metrics.
//!
//! [`TickMetrics`] captures what happened during a single tick.
//! [`RunSummary`] aggregates a whole [`Simulation::run`](crate::Simulation::run).

use stigmaze_agents::StepOutcome;

/// Counters and timing collected during a single tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickMetrics {
    /// Agents that moved to a neighbouring cell.
    pub moved: usize,
    /// Agents that chose to stay on an open cell.
    pub stayed: usize,
    /// Agents whose chosen destination was blocked.
    pub bumped: usize,
    /// Agents already on the goal.
    pub at_goal: usize,
    /// Walls opened by this tick's mutation, if any ran.
    pub walls_opened: usize,
    /// Paths closed by this tick's mutation, if any ran.
    pub walls_closed: usize,
    /// Sum of the pheromone field after the tick.
    pub pheromone_total: f64,
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
}

impl TickMetrics {
    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Moved => self.moved += 1,
            StepOutcome::Stayed => self.stayed += 1,
            StepOutcome::Bumped => self.bumped += 1,
            StepOutcome::AtGoal => self.at_goal += 1,
        }
    }
}

/// The first arrival at the goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finish {
    /// Tick on which an agent first stood on the goal.
    pub tick: u64,
    /// Simulated seconds elapsed at that tick.
    pub elapsed: f64,
    /// Which agent got there.
    pub agent: usize,
}

/// Outcome of a complete run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// First arrival, if any agent reached the goal.
    pub finish: Option<Finish>,
    /// Agents on the goal when the run stopped.
    pub agents_at_goal: usize,
    /// Agents in the run.
    pub agent_count: usize,
    /// Walls opened over the whole run.
    pub walls_opened: usize,
    /// Paths closed over the whole run.
    pub walls_closed: usize,
    /// Pheromone total at the end of the run.
    pub pheromone_total: f64,
}

impl RunSummary {
    /// `true` if at least one agent reached the goal.
    pub fn solved(&self) -> bool {
        self.finish.is_some()
    }
}
