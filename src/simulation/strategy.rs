//! Decision policies.
//!
//! A [`Policy`] maps the visible turn state (dice, roll number, scorecard) to
//! a [`Decision`]. [`from_spec`] builds one from a CLI spec string like
//! `"greedy"` or `"mc-fast:12"`.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::scorecard::{GameError, Scorecard};
use crate::simulation::heuristic::goal_to_reroll;
use crate::simulation::monte_carlo::{mean_delta_by_goal, MonteCarloConfig, SecondRollEval};
use crate::turn::Turn;
use crate::turn_evaluator::{best_category, Baseline};
use crate::types::{Decision, YahtzeeContext};

/// A turn-taking strategy. Policies hold no per-game state, so one instance
/// serves every game of a parallel batch.
pub trait Policy: Send + Sync {
    fn name(&self) -> &str;

    /// Decide what to do with the current dice.
    ///
    /// Fails with [`GameError::NoOpenCategories`] on a complete scorecard.
    fn decide(
        &self,
        ctx: &YahtzeeContext,
        turn: &Turn,
        card: &Scorecard,
        rng: &mut SmallRng,
    ) -> Result<Decision, GameError>;
}

// ── Random ────────────────────────────────────────────────────────────────

/// Records the first roll into a uniformly random open category.
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(
        &self,
        _ctx: &YahtzeeContext,
        _turn: &Turn,
        card: &Scorecard,
        rng: &mut SmallRng,
    ) -> Result<Decision, GameError> {
        let open = card.open_categories();
        if open.is_empty() {
            return Err(GameError::NoOpenCategories);
        }
        let pick = rng.random_range(0..open.len());
        open.iter()
            .nth(pick)
            .map(Decision::Record)
            .ok_or(GameError::NoOpenCategories)
    }
}

// ── Greedy, no rerolls ────────────────────────────────────────────────────

/// Records the first roll into the open category with the largest score
/// minus that category's optimal-play average.
pub struct GreedyNoReroll;

impl Policy for GreedyNoReroll {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(
        &self,
        _ctx: &YahtzeeContext,
        turn: &Turn,
        card: &Scorecard,
        _rng: &mut SmallRng,
    ) -> Result<Decision, GameError> {
        best_category(card, turn.dice(), Baseline::OptimalPlay)
            .map(|(cat, _)| Decision::Record(cat))
            .ok_or(GameError::NoOpenCategories)
    }
}

// ── Monte Carlo ───────────────────────────────────────────────────────────

/// Chases the goal with the highest rollout value at rolls 1 and 2, then
/// records the best final delta at roll 3.
///
/// With [`SecondRollEval::Exact`] the roll-2 step reads the transition
/// tensor instead of sampling.
pub struct MonteCarloPolicy {
    name: String,
    pub config: MonteCarloConfig,
}

impl MonteCarloPolicy {
    pub fn new(config: MonteCarloConfig) -> Self {
        let name = match config.second_roll {
            SecondRollEval::Sampled { .. } => format!("mc-slow:{}", config.samples_roll1),
            SecondRollEval::Exact => format!("mc-fast:{}", config.samples_roll1),
        };
        Self { name, config }
    }
}

impl Policy for MonteCarloPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(
        &self,
        ctx: &YahtzeeContext,
        turn: &Turn,
        card: &Scorecard,
        rng: &mut SmallRng,
    ) -> Result<Decision, GameError> {
        let values = mean_delta_by_goal(ctx, turn, card, &self.config, rng)?;
        let (goal, _) = values.best().ok_or(GameError::NoOpenCategories)?;
        if turn.can_reroll() {
            Ok(Decision::Reroll(goal_to_reroll(turn.dice(), goal)))
        } else {
            Ok(Decision::Record(goal))
        }
    }
}

// ── Spec parsing ──────────────────────────────────────────────────────────

fn parse_samples(spec: &str, raw: Option<&str>, default: usize) -> Result<usize, String> {
    match raw {
        None => Ok(default),
        Some(s) => match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("Invalid sample count in '{}': {}", spec, s)),
        },
    }
}

/// Parse a policy from a CLI spec string.
///
/// Supported specs:
/// - `"random"`: random open category, no rerolls
/// - `"greedy"`: best score minus optimal-play average, no rerolls
/// - `"mc-slow"` / `"mc-slow:N"`: Monte Carlo, N samples at both rolls (default 6)
/// - `"mc-fast"` / `"mc-fast:N"`: Monte Carlo, N samples at roll 1, exact roll 2
pub fn from_spec(spec: &str) -> Result<Box<dyn Policy>, String> {
    let mut parts = spec.splitn(2, ':');
    let head = parts.next().unwrap_or("");
    let arg = parts.next();

    match head {
        "random" | "greedy" if arg.is_some() => {
            Err(format!("Policy '{}' takes no arguments", head))
        }
        "random" => Ok(Box::new(RandomPolicy)),
        "greedy" => Ok(Box::new(GreedyNoReroll)),
        "mc-slow" => {
            let n = parse_samples(spec, arg, MonteCarloConfig::default().samples_roll1)?;
            Ok(Box::new(MonteCarloPolicy::new(MonteCarloConfig::sampled(n))))
        }
        "mc-fast" => {
            let n = parse_samples(spec, arg, MonteCarloConfig::default().samples_roll1)?;
            Ok(Box::new(MonteCarloPolicy::new(MonteCarloConfig::exact(n))))
        }
        _ => Err(format!(
            "Unknown policy spec: '{}'. Expected: random, greedy, mc-slow[:<n>], mc-fast[:<n>]",
            spec
        )),
    }
}
