//! Exact one-step expectations over the transition tensor.
//!
//! Two steps, mirroring a one-reroll lookahead:
//!
//! 1. [`FinalValues::compute`]: for every sorted roll, the best value among
//!    the open categories (static table score, Joker override, minus the
//!    baseline).
//! 2. [`expected_delta`]: `Σ_b T[a][r][b] · final[b]`, the expected best value
//!    after rerolling mask `r` of roll `a`.
//!
//! Step 1 depends only on the scorecard, so one table serves every candidate
//! mask and every sampled roll within a decision.

use crate::constants::*;
use crate::dice_mechanics::SortedRoll;
use crate::scorecard::{GameError, Scorecard};
use crate::types::{Category, CategorySet, Dice, RerollMask, YahtzeeContext};

/// What a category score is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    /// Raw scores.
    Absolute,
    /// Score minus the category's mean under optimal play.
    OptimalPlay,
}

impl Baseline {
    #[inline]
    pub fn offset(self, cat: Category) -> f64 {
        match self {
            Baseline::Absolute => 0.0,
            Baseline::OptimalPlay => cat.reference_average(),
        }
    }

    /// Value of recording `score` in `cat`.
    #[inline]
    pub fn delta(self, cat: Category, score: i32) -> f64 {
        score as f64 - self.offset(cat)
    }
}

/// Best immediate value of each sorted roll given the open categories.
pub struct FinalValues {
    pub values: [f64; NUM_DICE_SETS],
    pub baseline: Baseline,
}

impl FinalValues {
    /// Best value per sorted roll over `card`'s open categories, with the
    /// Joker rule applied from `card`'s state.
    pub fn compute(
        ctx: &YahtzeeContext,
        card: &Scorecard,
        baseline: Baseline,
    ) -> Result<Self, GameError> {
        Self::compute_for(ctx, card, card.open_categories(), baseline)
    }

    /// As [`FinalValues::compute`], restricted to `open` (a subset of the
    /// card's open categories). Fails on an empty `open`.
    pub fn compute_for(
        ctx: &YahtzeeContext,
        card: &Scorecard,
        open: CategorySet,
        baseline: Baseline,
    ) -> Result<Self, GameError> {
        if open.is_empty() {
            return Err(GameError::NoOpenCategories);
        }
        let mut values = [f64::NEG_INFINITY; NUM_DICE_SETS];
        let mut offsets = [0.0f64; CATEGORY_COUNT];
        for cat in open.iter() {
            offsets[cat.index()] = baseline.offset(cat);
        }

        for srid in 0..NUM_DICE_SETS {
            let dice = &ctx.all_dice_sets[srid];
            let joker = card.joker_unlocked(dice);
            let mut best = f64::NEG_INFINITY;
            for cat in open.iter() {
                let scr = card.live_score(dice, cat, ctx.score(srid, cat), joker);
                let val = scr as f64 - offsets[cat.index()];
                if val > best {
                    best = val;
                }
            }
            values[srid] = best;
        }
        Ok(Self { values, baseline })
    }

    #[inline(always)]
    pub fn get(&self, srid: usize) -> f64 {
        self.values[srid]
    }
}

/// Expected best value after rerolling `rrid` (sorted-roll positions) from `srid`.
pub fn expected_delta(
    ctx: &YahtzeeContext,
    srid: usize,
    rrid: usize,
    finals: &FinalValues,
) -> f64 {
    let row = ctx.transitions.row(srid, rrid);
    let mut sum = 0.0;
    for (dest, &p) in row.iter().enumerate() {
        if p != 0.0 {
            sum += p * finals.values[dest];
        }
    }
    sum
}

/// [`expected_delta`] for an unsorted roll and a mask over its own positions.
pub fn expected_delta_for_roll(
    ctx: &YahtzeeContext,
    dice: &Dice,
    mask: RerollMask,
    finals: &FinalValues,
) -> f64 {
    let sr = SortedRoll::new(ctx, dice);
    expected_delta(ctx, sr.srid, sr.to_sorted_mask(mask).id(), finals)
}

/// Open category with the highest value for the final dice; first wins ties.
pub fn best_category(
    card: &Scorecard,
    dice: &Dice,
    baseline: Baseline,
) -> Option<(Category, f64)> {
    let joker = card.joker_unlocked(dice);
    let mut best: Option<(Category, f64)> = None;
    for cat in card.open_categories().iter() {
        let table_score = crate::game_mechanics::calculate_category_score(dice, cat);
        let val = baseline.delta(cat, card.live_score(dice, cat, table_score, joker));
        if best.is_none_or(|(_, b)| val > b) {
            best = Some((cat, val));
        }
    }
    best
}
