//! Movement policies: choosing a step from the maze and agent state.
//!
//! [`AcoPolicy`] scores every open cardinal neighbour as
//!
//! ```text
//! score = pheromone(dest) * pheromone_influence
//!       + goal_term * goal_influence            (goal_term = 2.0 if closer, else 0.5)
//! score *= backtrack_penalty                    (only if dest undoes the last step)
//! score += U(0,1) * temperature * 2             (drawn per candidate)
//! ```
//!
//! and returns the strictly highest, so ties go to the earliest entry of
//! [`Step::CARDINALS`]. On a maze without a pheromone field it falls back
//! to a uniform choice among open neighbours. With no open neighbour the
//! result is [`Step::Stay`].
//!
//! Constructed via the builder pattern: [`AcoPolicy::builder`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stigmaze_core::{ConfigError, MazeView, PheromoneField, Step};

use crate::agent::AgentState;

/// Decides an agent's next step.
///
/// Policies are stateless with respect to the agent between calls; any
/// state they own (an RNG, learned weights) is their own.
pub trait MovementPolicy: Send + 'static {
    /// Human-readable policy name for logs.
    fn name(&self) -> &str;

    /// Pick the next step for `agent` on `maze`.
    ///
    /// Must only return [`Step::Stay`] or a step whose destination is
    /// open; return `Stay` if nothing is open.
    fn decide(&mut self, agent: &AgentState, maze: &dyn MazeView, temperature: f64) -> Step;

    /// Called after a committed step with the agent already at its new
    /// position. Returns the deposited cell's new intensity, if any.
    fn leave_pheromone(&mut self, _agent: &AgentState, _maze: &mut dyn MazeView) -> Option<f32> {
        None
    }
}

/// Weights and limits for [`AcoPolicy`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcoParams {
    /// Deposit at full progress. Default: 0.6.
    pub pheromone_strength: f64,
    /// Saturation level of a single cell. Default: 1.0.
    pub max_pheromone: f64,
    /// Weight of the goal-direction term. Default: 5.0.
    pub goal_influence: f64,
    /// Weight of the pheromone term. Default: 0.4.
    pub pheromone_influence: f64,
    /// Multiplier for a step that undoes the last one, in `(0, 1]`.
    /// Default: 0.1.
    pub backtrack_penalty: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            pheromone_strength: 0.6,
            max_pheromone: 1.0,
            goal_influence: 5.0,
            pheromone_influence: 0.4,
            backtrack_penalty: 0.1,
        }
    }
}

impl AcoParams {
    /// Goal term for a candidate that moves closer to the goal.
    pub const CLOSER: f64 = 2.0;
    /// Goal term for any other candidate.
    pub const NOT_CLOSER: f64 = 0.5;

    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("pheromone_strength", self.pheromone_strength)?;
        ConfigError::check_positive("max_pheromone", self.max_pheromone)?;
        ConfigError::check_non_negative("goal_influence", self.goal_influence)?;
        ConfigError::check_non_negative("pheromone_influence", self.pheromone_influence)?;
        ConfigError::check_positive("backtrack_penalty", self.backtrack_penalty)?;
        if self.backtrack_penalty > 1.0 {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "backtrack_penalty",
                value: self.backtrack_penalty,
            });
        }
        Ok(())
    }
}

/// Pheromone- and goal-biased step selection with annealed noise.
#[derive(Debug)]
pub struct AcoPolicy {
    params: AcoParams,
    rng: ChaCha8Rng,
}

/// Builder for [`AcoPolicy`].
///
/// Every parameter starts at its [`AcoParams::default`] value; the seed
/// starts at 0.
pub struct AcoPolicyBuilder {
    params: AcoParams,
    seed: u64,
}

impl AcoPolicy {
    /// Create a new builder for configuring an `AcoPolicy`.
    pub fn builder() -> AcoPolicyBuilder {
        AcoPolicyBuilder {
            params: AcoParams::default(),
            seed: 0,
        }
    }

    /// Build directly from validated parameters and an RNG seed.
    pub fn new(params: AcoParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// The configured parameters.
    pub fn params(&self) -> &AcoParams {
        &self.params
    }

    /// Noise-free score of `step`, or `None` if its destination is blocked
    /// or the maze has no pheromone field.
    ///
    /// Includes the backtrack penalty.
    pub fn base_score(&self, agent: &AgentState, maze: &dyn MazeView, step: Step) -> Option<f64> {
        let field = maze.pheromone()?;
        self.score_with(field, agent, maze, step)
    }

    fn score_with(
        &self,
        field: &PheromoneField,
        agent: &AgentState,
        maze: &dyn MazeView,
        step: Step,
    ) -> Option<f64> {
        let dest = agent.position.offset(step);
        if !maze.is_open(dest) {
            return None;
        }
        let pheromone = field.get(dest).unwrap_or(0.0) as f64;
        let goal_term = if agent.is_closer_to_goal(dest) {
            AcoParams::CLOSER
        } else {
            AcoParams::NOT_CLOSER
        };
        let mut score =
            pheromone * self.params.pheromone_influence + goal_term * self.params.goal_influence;
        if step.is_reverse_of(agent.velocity) {
            score *= self.params.backtrack_penalty;
        }
        Some(score)
    }

    fn random_valid_move(&mut self, agent: &AgentState, maze: &dyn MazeView) -> Step {
        let open: Vec<Step> = Step::CARDINALS
            .into_iter()
            .filter(|&s| maze.is_open(agent.position.offset(s)))
            .collect();
        if open.is_empty() {
            return Step::Stay;
        }
        open[self.rng.random_range(0..open.len())]
    }
}

impl AcoPolicyBuilder {
    /// Deposit at full progress (default: 0.6). Must be >= 0.
    pub fn pheromone_strength(mut self, v: f64) -> Self {
        self.params.pheromone_strength = v;
        self
    }

    /// Saturation level of a single cell (default: 1.0). Must be > 0.
    pub fn max_pheromone(mut self, v: f64) -> Self {
        self.params.max_pheromone = v;
        self
    }

    /// Weight of the goal-direction term (default: 5.0). Must be >= 0.
    pub fn goal_influence(mut self, v: f64) -> Self {
        self.params.goal_influence = v;
        self
    }

    /// Weight of the pheromone term (default: 0.4). Must be >= 0.
    pub fn pheromone_influence(mut self, v: f64) -> Self {
        self.params.pheromone_influence = v;
        self
    }

    /// Backtrack multiplier (default: 0.1). Must be in `(0, 1]`.
    pub fn backtrack_penalty(mut self, v: f64) -> Self {
        self.params.backtrack_penalty = v;
        self
    }

    /// Replace every parameter at once.
    pub fn params(mut self, params: AcoParams) -> Self {
        self.params = params;
        self
    }

    /// RNG seed for noise and fallback moves (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the policy, validating all configuration.
    pub fn build(self) -> Result<AcoPolicy, ConfigError> {
        AcoPolicy::new(self.params, self.seed)
    }
}

impl MovementPolicy for AcoPolicy {
    fn name(&self) -> &str {
        "AcoPolicy"
    }

    fn decide(&mut self, agent: &AgentState, maze: &dyn MazeView, temperature: f64) -> Step {
        let Some(field) = maze.pheromone() else {
            return self.random_valid_move(agent, maze);
        };

        let mut best: Option<(Step, f64)> = None;
        for step in Step::CARDINALS {
            let Some(base) = self.score_with(field, agent, maze, step) else {
                continue;
            };
            let value = base + self.rng.random::<f64>() * temperature * 2.0;
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((step, value));
            }
        }
        best.map_or(Step::Stay, |(step, _)| step)
    }

    fn leave_pheromone(&mut self, agent: &AgentState, maze: &mut dyn MazeView) -> Option<f32> {
        let field = maze.pheromone_mut()?;
        let amount = self.params.pheromone_strength * agent.progress();
        field.deposit(
            agent.position,
            amount as f32,
            self.params.max_pheromone as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stigmaze_core::{Cell, Pos};
    use stigmaze_maze::{DynamicMaze, Grid, MutationParams};

    fn open_room(cols: u32, rows: u32) -> DynamicMaze {
        let params = MutationParams {
            change_probability: 0.0,
            ..MutationParams::default()
        };
        DynamicMaze::from_grid(Grid::filled(cols, rows, Cell::Path), params, 0).unwrap()
    }

    fn agent_at(x: i32, y: i32, goal: Pos, velocity: Step) -> AgentState {
        let mut s = AgentState::new(Pos::new(x, y), goal);
        s.velocity = velocity;
        s
    }

    #[test]
    fn builder_defaults() {
        let p = AcoPolicy::builder().build().unwrap();
        assert_eq!(p.params(), &AcoParams::default());
        assert_eq!(p.name(), "AcoPolicy");
    }

    #[test]
    fn builder_rejects_bad_penalty() {
        assert!(AcoPolicy::builder().backtrack_penalty(0.0).build().is_err());
        assert!(AcoPolicy::builder().backtrack_penalty(1.5).build().is_err());
        assert!(AcoPolicy::builder().backtrack_penalty(1.0).build().is_ok());
    }

    #[test]
    fn builder_rejects_negative_weights() {
        assert!(matches!(
            AcoPolicy::builder().goal_influence(-1.0).build(),
            Err(ConfigError::Negative { name: "goal_influence", .. })
        ));
        assert!(matches!(
            AcoPolicy::builder().pheromone_strength(f64::NAN).build(),
            Err(ConfigError::NonFinite { .. })
        ));
        assert!(AcoPolicy::builder().max_pheromone(0.0).build().is_err());
    }

    #[test]
    fn walled_in_agent_stays() {
        let grid = Grid::from_ascii(&["###", "#.#", "###"]);
        let params = MutationParams::default();
        let maze = DynamicMaze::from_grid(grid, params, 0).unwrap();
        let mut policy = AcoPolicy::builder().build().unwrap();
        let agent = agent_at(1, 1, Pos::new(5, 5), Step::Stay);
        assert_eq!(policy.decide(&agent, &maze, 1.0), Step::Stay);
    }

    #[test]
    fn walled_in_agent_stays_without_pheromone() {
        let grid = Grid::from_ascii(&["###", "#.#", "###"]);
        let mut policy = AcoPolicy::builder().build().unwrap();
        let agent = agent_at(1, 1, Pos::new(5, 5), Step::Stay);
        assert_eq!(policy.decide(&agent, &grid, 1.0), Step::Stay);
    }

    #[test]
    fn greedy_toward_goal_at_zero_temperature() {
        let maze = open_room(5, 5);
        let mut policy = AcoPolicy::builder().build().unwrap();
        // Down and Right both approach (4,4); Down is enumerated first.
        let agent = agent_at(0, 0, Pos::new(4, 4), Step::Stay);
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Down);
        // Only Right approaches (4,0).
        let agent = agent_at(0, 0, Pos::new(4, 0), Step::Stay);
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Right);
    }

    #[test]
    fn ties_break_in_enumeration_order() {
        let maze = open_room(5, 5);
        let mut policy = AcoPolicy::builder().build().unwrap();
        // Agent already on its goal: no candidate is closer, all tie.
        let agent = agent_at(2, 2, Pos::new(2, 2), Step::Stay);
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Down);
    }

    #[test]
    fn backtrack_loses_a_tie() {
        let maze = open_room(5, 5);
        let mut policy = AcoPolicy::builder().build().unwrap();
        // Last step was Up, so Down (first in order) is a backtrack.
        let agent = agent_at(2, 2, Pos::new(2, 2), Step::Up);
        let down = policy.base_score(&agent, &maze, Step::Down).unwrap();
        let right = policy.base_score(&agent, &maze, Step::Right).unwrap();
        assert!(down < right);
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Right);
    }

    #[test]
    fn backtrack_penalty_outweighs_goal_bias() {
        let maze = open_room(5, 5);
        let mut policy = AcoPolicy::builder().build().unwrap();
        // Goal straight up, but the agent just came down.
        let agent = agent_at(2, 2, Pos::new(2, 0), Step::Down);
        assert_eq!(policy.base_score(&agent, &maze, Step::Up), Some(1.0));
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Down);
    }

    #[test]
    fn pheromone_breaks_goal_tie() {
        let mut maze = open_room(5, 5);
        maze.pheromone_field_mut().deposit(Pos::new(3, 2), 1.0, 1.0);
        let mut policy = AcoPolicy::builder().build().unwrap();
        let agent = agent_at(2, 2, Pos::new(2, 2), Step::Stay);
        assert_eq!(policy.decide(&agent, &maze, 0.0), Step::Right);
    }

    #[test]
    fn blocked_destinations_are_skipped() {
        let grid = Grid::from_ascii(&["#####", "#...#", "###.#", "#####"]);
        let maze = DynamicMaze::from_grid(grid, MutationParams::default(), 0).unwrap();
        let policy = AcoPolicy::builder().build().unwrap();
        let agent = agent_at(3, 1, Pos::new(3, 2), Step::Stay);
        assert_eq!(policy.base_score(&agent, &maze, Step::Up), None);
        assert_eq!(policy.base_score(&agent, &maze, Step::Right), None);
        assert!(policy.base_score(&agent, &maze, Step::Down).is_some());
        assert!(policy.base_score(&agent, &maze, Step::Left).is_some());
    }

    #[test]
    fn random_fallback_only_picks_open_moves() {
        let grid = Grid::from_ascii(&["#####", "#...#", "#####"]);
        let mut policy = AcoPolicy::builder().seed(99).build().unwrap();
        let agent = agent_at(2, 1, Pos::new(3, 1), Step::Stay);
        for _ in 0..50 {
            let s = policy.decide(&agent, &grid, 1.0);
            assert!(s == Step::Left || s == Step::Right, "{s:?}");
        }
    }

    #[test]
    fn deposit_scales_with_progress() {
        let mut maze = open_room(9, 1);
        let mut policy = AcoPolicy::builder().build().unwrap();
        let mut agent = AgentState::new(Pos::new(0, 0), Pos::new(8, 0));
        agent.position = Pos::new(4, 0);
        agent.current_distance = 4;
        let v = policy.leave_pheromone(&agent, &mut maze).unwrap();
        assert!((v - 0.3).abs() < 1e-6, "{v}");
    }

    #[test]
    fn deposit_clamps_negative_progress() {
        let mut maze = open_room(9, 1);
        let mut policy = AcoPolicy::builder().build().unwrap();
        let mut agent = AgentState::new(Pos::new(4, 0), Pos::new(6, 0));
        agent.position = Pos::new(0, 0);
        agent.current_distance = 6;
        assert_eq!(policy.leave_pheromone(&agent, &mut maze), Some(0.0));
    }

    #[test]
    fn deposit_is_noop_without_field() {
        let mut grid = Grid::filled(3, 3, Cell::Path);
        let mut policy = AcoPolicy::builder().build().unwrap();
        let agent = AgentState::new(Pos::new(1, 1), Pos::new(2, 2));
        assert_eq!(policy.leave_pheromone(&agent, &mut grid), None);
    }

    #[test]
    fn same_seed_same_decisions() {
        let maze = open_room(7, 7);
        let run = || {
            let mut policy = AcoPolicy::builder().seed(5).build().unwrap();
            let agent = agent_at(3, 3, Pos::new(3, 3), Step::Stay);
            (0..32)
                .map(|_| policy.decide(&agent, &maze, 10.0))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
