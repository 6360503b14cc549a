//! Game constants, table dimensions, and published reference averages.
//!
//! Table sizes:
//! - [`NUM_DICE_SETS`] = 252 sorted 5-dice multisets (C(10,5))
//! - [`NUM_REROLL_MASKS`] = 32 subsets of the five die positions
//! - [`CATEGORY_COUNT`] = 13 scorecard boxes
//!
//! The transition tensor is `NUM_DICE_SETS × NUM_REROLL_MASKS × NUM_DICE_SETS`
//! f64 entries (~16 MB).

/// Dice per roll.
pub const NUM_DICE: usize = 5;

/// Faces per die.
pub const NUM_FACES: usize = 6;

/// Number of distinct sorted 5-dice multisets from {1..6}: C(10,5) = 252.
pub const NUM_DICE_SETS: usize = 252;

/// Number of reroll masks: every subset of the 5 positions.
pub const NUM_REROLL_MASKS: usize = 32;

/// Number of scoring categories in standard Yahtzee.
pub const CATEGORY_COUNT: usize = 13;

/// Rolls available per turn (initial roll plus two rerolls).
pub const MAX_ROLLS_PER_TURN: u8 = 3;

/// 6^k for k rerolled dice.
pub const POW6: [usize; 6] = [1, 6, 36, 216, 1296, 7776];

/// Tolerance for transition-tensor row sums.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Fixed category scores.
pub const FULL_HOUSE_SCORE: i32 = 25;
pub const SMALL_STRAIGHT_SCORE: i32 = 30;
pub const LARGE_STRAIGHT_SCORE: i32 = 40;
pub const YAHTZEE_SCORE: i32 = 50;

/// Upper bonus: 35 points if the raw upper total reaches 63.
pub const UPPER_BONUS: i32 = 35;
pub const UPPER_BONUS_THRESHOLD: i32 = 63;

/// Points per extra Yahtzee once the Yahtzee box holds 50.
pub const YAHTZEE_BONUS: i32 = 100;

/// Highest legal final score: 105 upper + 35 bonus + 235 lower + 12 × 100.
pub const MAX_GAME_SCORE: i32 = 1575;

/// Mean box score under optimal play, in category order (Aces..Chance).
///
/// Published figures for solitaire Yahtzee; used as the baseline when
/// comparing candidate scores across categories of different scale.
pub const OPTIMAL_AVG_CATEGORY_SCORES: [f64; CATEGORY_COUNT] = [
    1.88, 5.28, 8.57, 12.16, 15.69, 19.19, // Aces–Sixes
    21.66, 13.10, 22.59, 29.46, 32.71, 16.87, 22.01, // 3K, 4K, FH, SS, LS, Y, C
];

/// Probability that optimal play records zero in each category.
pub const OPTIMAL_ZERO_SCORE_PROB: [f64; CATEGORY_COUNT] = [
    0.1084, 0.0180, 0.0095, 0.0060, 0.0050, 0.0053, //
    0.0326, 0.3634, 0.0963, 0.0180, 0.1822, 0.6626, 0.0,
];

/// Mean upper bonus under optimal play.
pub const OPTIMAL_AVG_UPPER_BONUS: f64 = 23.84;

/// Mean Yahtzee bonus under optimal play.
pub const OPTIMAL_AVG_YAHTZEE_BONUS: f64 = 9.58;

/// Probability that optimal play misses the upper bonus.
pub const OPTIMAL_ZERO_UPPER_BONUS_PROB: f64 = 0.3188;

/// Probability that optimal play scores no Yahtzee bonus.
pub const OPTIMAL_ZERO_YAHTZEE_BONUS_PROB: f64 = 0.9176;

/// Flat index into the transition tensor for (source, mask, destination).
#[inline(always)]
pub fn transition_index(srid: usize, rrid: usize, dest: usize) -> usize {
    (srid * NUM_REROLL_MASKS + rrid) * NUM_DICE_SETS + dest
}
