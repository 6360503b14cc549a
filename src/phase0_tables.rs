//! Build all static lookup tables.
//!
//! The orchestrator [`precompute_lookup_tables`] runs the steps in dependency
//! order; each later step reads what the earlier ones wrote:
//!
//! 1. **Dice combinations**: enumerate the 252 sorted 5-dice multisets in
//!    lexicographic order (srid 0..252) + 5D reverse lookup
//! 2. **Category scores**: static score for every (srid, category)
//! 3. **Transition tensor**: `T[a][r][b]` for every srid, reroll mask, and
//!    destination srid, by exhaustive enumeration of the rerolled dice
//!
//! Once built, the context is never mutated again.

use std::time::Instant;

use crate::constants::*;
use crate::dice_mechanics::{count_faces, sort_dice_set};
use crate::game_mechanics::calculate_category_score;
use crate::types::{Category, RerollMask, YahtzeeContext};

/// Enumerate all C(10,5) = 252 sorted 5-dice multisets and build
/// a 5D reverse lookup table: `index_lookup[d1-1][d2-1][d3-1][d4-1][d5-1] = srid`.
pub fn build_all_dice_combinations(ctx: &mut YahtzeeContext) {
    ctx.num_combinations = 0;
    for a in 1..=6u8 {
        for b in a..=6 {
            for c in b..=6 {
                for d in c..=6 {
                    for e in d..=6 {
                        let idx = ctx.num_combinations;
                        ctx.all_dice_sets[idx] = [a, b, c, d, e];
                        ctx.index_lookup[(a - 1) as usize][(b - 1) as usize][(c - 1) as usize]
                            [(d - 1) as usize][(e - 1) as usize] = idx as u8;
                        ctx.num_combinations += 1;
                    }
                }
            }
        }
    }
}

/// Static score for every srid and category.
pub fn precompute_category_scores(ctx: &mut YahtzeeContext) {
    for i in 0..NUM_DICE_SETS {
        let dice = ctx.all_dice_sets[i];
        for cat in Category::ALL {
            ctx.precomputed_scores[i][cat.index()] = calculate_category_score(&dice, cat);
        }
    }
}

/// Base-6 key of the face counts of the dice a mask keeps.
fn kept_multiset_key(dice: &[u8; NUM_DICE], mask: RerollMask) -> usize {
    let mut kept = [0u8; 7];
    for pos in 0..NUM_DICE {
        if !mask.contains(pos) {
            kept[dice[pos] as usize] += 1;
        }
    }
    kept[1..]
        .iter()
        .fold(0usize, |key, &n| key * NUM_FACES + n as usize)
}

/// Build the reroll transition tensor.
///
/// For each (srid, mask) with k rerolled dice, enumerate all 6^k outcomes,
/// substitute them into the sorted representative, re-sort, and add 1/6^k to
/// the destination srid. k = 0 puts all mass on the source roll.
///
/// A row depends only on the multiset of kept dice, so masks that keep the
/// same faces (from the same or a different source roll) share one
/// enumeration: 462 distinct keeps cover all 8,064 rows.
pub fn precompute_transition_tensor(ctx: &mut YahtzeeContext) {
    const NO_ROW: usize = usize::MAX;
    // 6^6 covers every base-6 count key.
    let mut keep_rows = vec![NO_ROW; 46656];
    let mut num_unique = 0usize;

    let all_dice_sets = ctx.all_dice_sets;
    let probs = &mut ctx.transitions.probs;
    probs.iter_mut().for_each(|p| *p = 0.0);

    for srid in 0..NUM_DICE_SETS {
        let dice = all_dice_sets[srid];
        for mask in RerollMask::all_masks() {
            let row_start = transition_index(srid, mask.id(), 0);
            let key = kept_multiset_key(&dice, mask);

            let cached = keep_rows[key];
            if cached != NO_ROW {
                probs.copy_within(cached..cached + NUM_DICE_SETS, row_start);
                continue;
            }
            keep_rows[key] = row_start;
            num_unique += 1;

            let mut positions = [0usize; NUM_DICE];
            let mut k = 0;
            for pos in mask.positions() {
                positions[k] = pos;
                k += 1;
            }

            let weight = 1.0 / POW6[k] as f64;
            for outcome in 0..POW6[k] {
                let mut roll = dice;
                let mut rest = outcome;
                for &pos in &positions[..k] {
                    roll[pos] = (rest % NUM_FACES) as u8 + 1;
                    rest /= NUM_FACES;
                }
                sort_dice_set(&mut roll);
                let dest = ctx.index_lookup[(roll[0] - 1) as usize][(roll[1] - 1) as usize]
                    [(roll[2] - 1) as usize][(roll[3] - 1) as usize][(roll[4] - 1) as usize]
                    as usize;
                probs[row_start + dest] += weight;
            }
        }
    }

    println!(
        "    Transition tensor: {} rows, {} distinct keeps, {:.1} MB",
        NUM_DICE_SETS * NUM_REROLL_MASKS,
        num_unique,
        (probs.len() * std::mem::size_of::<f64>()) as f64 / (1024.0 * 1024.0)
    );
}

/// Check that every tensor row is a probability distribution.
///
/// Panics on failure: a bad row means the tables are corrupt.
pub fn verify_transition_rows(ctx: &YahtzeeContext) {
    let deviation = ctx.transitions.max_row_deviation();
    assert!(
        deviation < ROW_SUM_TOLERANCE,
        "transition row sums deviate from 1 by {:e}",
        deviation
    );
}

/// Build every static lookup table in dependency order.
pub fn precompute_lookup_tables(ctx: &mut YahtzeeContext) {
    println!("=== Precompute Lookup Tables ===");
    let phase0_start = Instant::now();

    macro_rules! timed {
        ($label:expr, $body:expr) => {{
            let t0 = Instant::now();
            $body;
            let dt = t0.elapsed().as_secs_f64() * 1000.0;
            println!("  {:<42} {:>8.3} ms", $label, dt);
        }};
    }

    timed!("Dice combinations (252)", build_all_dice_combinations(ctx));
    timed!("Category scores", precompute_category_scores(ctx));
    timed!("Transition tensor", precompute_transition_tensor(ctx));
    timed!("Row-sum check", verify_transition_rows(ctx));

    let total = phase0_start.elapsed().as_secs_f64() * 1000.0;
    println!("  {:<42} {:>8.3} ms", "TOTAL", total);
    println!();
}

/// Probability of rolling a sorted dice set from 5 fresh dice:
/// 5! / (n1! · … · n6!) / 6^5.
pub fn fresh_roll_probability(dice: &[u8; NUM_DICE]) -> f64 {
    const FACTORIAL: [u32; 6] = [1, 1, 2, 6, 24, 120];
    let face_count = count_faces(dice);
    let denom: u32 = face_count[1..].iter().map(|&n| FACTORIAL[n as usize]).product();
    FACTORIAL[5] as f64 / denom as f64 / POW6[5] as f64
}
