//! Policies, rollouts, and game simulation.
//!
//! - [`heuristic`]: goal-to-reroll shape rules
//! - [`monte_carlo`]: sampled evaluation of turn goals
//! - [`strategy`]: the [`Policy`] trait and its implementations
//! - [`engine`]: play games and batches
//! - [`statistics`]: aggregate statistics from recorded games

pub mod engine;
pub mod heuristic;
pub mod monte_carlo;
pub mod statistics;
pub mod strategy;

// Re-export commonly used items
pub use engine::{
    play_turn, simulate_batch, simulate_game, GameRecord, SimulationResult, TurnRecord,
};
pub use heuristic::{goal_to_reroll, goals_to_rerolls};
pub use monte_carlo::{mean_delta_by_goal, GoalValues, MonteCarloConfig, SecondRollEval};
pub use statistics::{aggregate_statistics, save_statistics, GameStatistics};
pub use strategy::{from_spec, GreedyNoReroll, MonteCarloPolicy, Policy, RandomPolicy};
