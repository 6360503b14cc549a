//! Monte Carlo rollout evaluation of turn goals.
//!
//! For each open category taken as a goal, derive the heuristic reroll from
//! [`goal_to_reroll`], sample outcomes of that reroll, and value each outcome
//! by the best continuation:
//!
//! - roll 1: sample roll 2, then take the best goal's roll-2 value
//! - roll 2: either sample roll 3 ([`SecondRollEval::Sampled`]) or take the
//!   exact one-step expectation over the transition tensor
//!   ([`SecondRollEval::Exact`])
//! - roll 3: the final value of recording now
//!
//! All values are deltas against the optimal-play category averages, so
//! categories of different scale compare directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dice_mechanics::{reroll, sorted};
use crate::scorecard::{GameError, Scorecard};
use crate::simulation::heuristic::goal_to_reroll;
use crate::turn::Turn;
use crate::turn_evaluator::{expected_delta_for_roll, Baseline, FinalValues};
use crate::types::{Category, Dice, YahtzeeContext};

/// Outcomes of roll 2 sampled per goal at roll 1.
pub const DEFAULT_SAMPLES_ROLL1: usize = 6;
/// Outcomes of roll 3 sampled per goal at roll 2.
pub const DEFAULT_SAMPLES_ROLL2: usize = 6;

/// How roll-2 goals are valued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SecondRollEval {
    /// Mean best final delta over `samples` sampled third rolls.
    Sampled { samples: usize },
    /// Expectation over the transition tensor.
    Exact,
}

impl Default for SecondRollEval {
    fn default() -> Self {
        SecondRollEval::Sampled {
            samples: DEFAULT_SAMPLES_ROLL2,
        }
    }
}

/// Sample counts for the rollout evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    #[serde(default = "default_samples_roll1")]
    pub samples_roll1: usize,
    #[serde(default)]
    pub second_roll: SecondRollEval,
}

fn default_samples_roll1() -> usize {
    DEFAULT_SAMPLES_ROLL1
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples_roll1: DEFAULT_SAMPLES_ROLL1,
            second_roll: SecondRollEval::default(),
        }
    }
}

impl MonteCarloConfig {
    /// Sampled at both rolls with `samples` each.
    pub fn sampled(samples: usize) -> Self {
        Self {
            samples_roll1: samples,
            second_roll: SecondRollEval::Sampled { samples },
        }
    }

    /// Sampled at roll 1, exact at roll 2.
    pub fn exact(samples_roll1: usize) -> Self {
        Self {
            samples_roll1,
            second_roll: SecondRollEval::Exact,
        }
    }
}

/// Value per goal category; `None` for goals that were not evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalValues(pub [Option<f64>; CATEGORY_COUNT]);

impl GoalValues {
    fn new() -> Self {
        GoalValues([None; CATEGORY_COUNT])
    }

    pub fn get(&self, cat: Category) -> Option<f64> {
        self.0[cat.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(move |c| self.0[c.index()].map(|v| (c, v)))
    }

    /// Highest-valued goal; the lowest category index wins ties.
    pub fn best(&self) -> Option<(Category, f64)> {
        let mut best: Option<(Category, f64)> = None;
        for (cat, val) in self.iter() {
            if best.is_none_or(|(_, b)| val > b) {
                best = Some((cat, val));
            }
        }
        best
    }
}

fn mean_of<F: FnMut() -> f64>(n: usize, mut sample: F) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (0..n).map(|_| sample()).sum::<f64>() / n as f64
}

/// Best final delta for a finished roll.
#[inline]
fn final_value(ctx: &YahtzeeContext, finals: &FinalValues, dice: &Dice) -> f64 {
    finals.get(ctx.srid(&sorted(dice)))
}

/// Value of each open goal from a roll-2 position.
pub fn roll2_goal_values<R: Rng + ?Sized>(
    ctx: &YahtzeeContext,
    card: &Scorecard,
    finals: &FinalValues,
    dice: &Dice,
    eval: SecondRollEval,
    rng: &mut R,
) -> GoalValues {
    let mut values = GoalValues::new();
    for goal in card.open_categories().iter() {
        let mask = goal_to_reroll(dice, goal);
        let val = match eval {
            SecondRollEval::Exact => expected_delta_for_roll(ctx, dice, mask, finals),
            SecondRollEval::Sampled { samples } => mean_of(samples, || {
                final_value(ctx, finals, &reroll(dice, mask, rng))
            }),
        };
        values.0[goal.index()] = Some(val);
    }
    values
}

/// Best goal value from a roll-2 position.
pub fn second_roll_value<R: Rng + ?Sized>(
    ctx: &YahtzeeContext,
    card: &Scorecard,
    finals: &FinalValues,
    dice: &Dice,
    eval: SecondRollEval,
    rng: &mut R,
) -> f64 {
    roll2_goal_values(ctx, card, finals, dice, eval, rng)
        .best()
        .map_or(f64::NEG_INFINITY, |(_, v)| v)
}

/// Mean delta of chasing each open category from the current turn position.
///
/// At roll 3 this is the delta of recording the dice in each category.
pub fn mean_delta_by_goal<R: Rng + ?Sized>(
    ctx: &YahtzeeContext,
    turn: &Turn,
    card: &Scorecard,
    config: &MonteCarloConfig,
    rng: &mut R,
) -> Result<GoalValues, GameError> {
    let finals = FinalValues::compute(ctx, card, Baseline::OptimalPlay)?;
    let open = card.open_categories();
    let dice = turn.dice();

    match turn.roll_num() {
        1 => {
            let mut values = GoalValues::new();
            for goal in open.iter() {
                let mask = goal_to_reroll(dice, goal);
                let val = mean_of(config.samples_roll1, || {
                    let dice2 = reroll(dice, mask, rng);
                    second_roll_value(ctx, card, &finals, &dice2, config.second_roll, rng)
                });
                values.0[goal.index()] = Some(val);
            }
            Ok(values)
        }
        2 => Ok(roll2_goal_values(ctx, card, &finals, dice, config.second_roll, rng)),
        _ => {
            let joker = card.joker_unlocked(dice);
            let srid = ctx.srid(&sorted(dice));
            let mut values = GoalValues::new();
            for cat in open.iter() {
                let score = card.live_score(dice, cat, ctx.score(srid, cat), joker);
                values.0[cat.index()] = Some(Baseline::OptimalPlay.delta(cat, score));
            }
            Ok(values)
        }
    }
}
