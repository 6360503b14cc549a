//! Game simulation engine: plays solitaire games with a [`Policy`].
//!
//! Each game is 13 turns of roll → (reroll → reroll →) record, driven by the
//! policy's decisions. Batches run in parallel with rayon over a shared
//! read-only [`YahtzeeContext`]; game `i` is seeded with `seed + i`, so a
//! batch is reproducible regardless of thread count.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::constants::*;
use crate::scorecard::{GameError, RuleConfig, Scorecard};
use crate::simulation::strategy::Policy;
use crate::turn::Turn;
use crate::types::{Category, Decision, Dice, YahtzeeContext};

/// One category-filling turn.
#[derive(Clone, Debug, Serialize)]
pub struct TurnRecord {
    /// Dice after each roll, in roll order (1 to 3 entries).
    pub rolls: Vec<Dice>,
    /// Reroll mask (rrid) applied after each roll but the last.
    pub masks: Vec<u8>,
    pub category: Category,
    pub score: i32,
    /// This record earned a Yahtzee bonus.
    pub yahtzee_bonus: bool,
}

/// A finished game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub turns: Vec<TurnRecord>,
    /// Recorded score per category, in category order.
    pub category_scores: [i32; CATEGORY_COUNT],
    pub upper_raw: i32,
    pub upper_bonus: i32,
    pub yahtzee_bonus: i32,
    pub total_score: i32,
}

impl GameRecord {
    fn from_card(turns: Vec<TurnRecord>, card: &Scorecard) -> Self {
        let mut category_scores = [0; CATEGORY_COUNT];
        for cat in Category::ALL {
            category_scores[cat.index()] = card.recorded(cat).unwrap_or(0);
        }
        Self {
            turns,
            category_scores,
            upper_raw: card.upper_raw(),
            upper_bonus: card.upper_bonus(),
            yahtzee_bonus: card.yahtzee_bonus(),
            total_score: card.final_score(),
        }
    }
}

/// Results of a batch simulation.
pub struct SimulationResult {
    pub policy: String,
    pub records: Vec<GameRecord>,
    /// Kept scores, ascending.
    pub scores: Vec<i32>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
    pub median: i32,
    /// Games dropped for scoring below the minimum.
    pub discarded: usize,
    pub elapsed: std::time::Duration,
}

/// Play one turn: roll, follow the policy's rerolls, record.
pub fn play_turn(
    ctx: &YahtzeeContext,
    policy: &dyn Policy,
    card: &mut Scorecard,
    rng: &mut SmallRng,
) -> Result<TurnRecord, GameError> {
    if card.is_complete() {
        return Err(GameError::GameComplete);
    }
    let mut turn = Turn::roll(rng);
    let mut rolls = vec![*turn.dice()];
    let mut masks = Vec::with_capacity(2);

    loop {
        match policy.decide(ctx, &turn, card, rng)? {
            Decision::Reroll(mask) => {
                turn.reroll(mask, rng)?;
                masks.push(mask.id() as u8);
                rolls.push(*turn.dice());
            }
            Decision::Record(category) => {
                let yahtzee_bonus = card.earns_yahtzee_bonus(turn.dice());
                let score = card.apply_category(category, turn.dice())?;
                return Ok(TurnRecord {
                    rolls,
                    masks,
                    category,
                    score,
                    yahtzee_bonus,
                });
            }
        }
    }
}

/// Play a full 13-turn game.
pub fn simulate_game(
    ctx: &YahtzeeContext,
    policy: &dyn Policy,
    rules: RuleConfig,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let mut card = Scorecard::with_rules(rules);
    let mut turns = Vec::with_capacity(CATEGORY_COUNT);
    for _ in 0..CATEGORY_COUNT {
        turns.push(play_turn(ctx, policy, &mut card, rng)?);
    }
    Ok(GameRecord::from_card(turns, &card))
}

/// Play `num_games` games in parallel and keep those scoring at least
/// `min_score`.
pub fn simulate_batch(
    ctx: &YahtzeeContext,
    policy: &dyn Policy,
    rules: RuleConfig,
    num_games: usize,
    seed: u64,
    min_score: i32,
) -> Result<SimulationResult, GameError> {
    let start = Instant::now();

    let all: Vec<GameRecord> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_game(ctx, policy, rules, &mut rng)
        })
        .collect::<Result<_, _>>()?;

    let elapsed = start.elapsed();

    let records: Vec<GameRecord> = all
        .into_iter()
        .filter(|r| r.total_score >= min_score)
        .collect();
    let discarded = num_games - records.len();

    let mut scores: Vec<i32> = records.iter().map(|r| r.total_score).collect();
    let n = scores.len();
    let (mean, std_dev) = if n == 0 {
        (0.0, 0.0)
    } else {
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n as f64;
        let variance = scores
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        (mean, variance.sqrt())
    };
    let min = *scores.iter().min().unwrap_or(&0);
    let max = *scores.iter().max().unwrap_or(&0);

    scores.sort_unstable();
    let median = scores.get(n / 2).copied().unwrap_or(0);

    Ok(SimulationResult {
        policy: policy.name().to_string(),
        records,
        scores,
        mean,
        std_dev,
        min,
        max,
        median,
        discarded,
        elapsed,
    })
}
