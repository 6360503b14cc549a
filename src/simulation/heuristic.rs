//! Heuristic goal-to-reroll mapping.
//!
//! Given a roll and a target category ("goal"), pick which die positions to
//! reroll using local shape rules instead of a search over the 32 masks:
//!
//! | Goal | Reroll |
//! |------|--------|
//! | Aces..Sixes | every die not showing the pip |
//! | 3K / 4K | with a triple: non-mode dice below 4; else all but the highest mode |
//! | Full house | nothing on a full house; two of five on a Yahtzee; one of the four plus the odd die on 4K; else all but the two most frequent values |
//! | Small straight | duplicates inside the longest run plus dice more than 2 away from it |
//! | Large straight | as small straight, tighter on a 4-run; the duplicates of a 1-3-5 or 2-4-6 roll, faces first seen in that order |
//! | Yahtzee | all but the highest mode |
//! | Chance | dice below 4 |
//!
//! Masks index the roll's own positions (bit k ⇒ position k). Ties resolve by
//! first appearance in the roll, which fixes the exact output for rolls with
//! equally frequent values.

use crate::constants::*;
use crate::dice_mechanics::{count_faces, longest_run};
use crate::types::{Category, CategorySet, Dice, RerollMask};

/// Face counts in order of first appearance in the roll.
fn counts_by_appearance(dice: &Dice) -> Vec<(u8, u8)> {
    let face_count = count_faces(dice);
    let mut out: Vec<(u8, u8)> = Vec::with_capacity(NUM_DICE);
    for &d in dice {
        if !out.iter().any(|&(v, _)| v == d) {
            out.push((d, face_count[d as usize]));
        }
    }
    out
}

#[inline]
fn reroll_all_but(dice: &Dice, pip: u8) -> RerollMask {
    RerollMask::from_predicate(dice, |d| d != pip)
}

/// Later copies of any value in the run that appears more than once.
fn run_duplicates(
    dice: &Dice,
    face_count: &[u8; 7],
    run_contains: impl Fn(u8) -> bool,
) -> RerollMask {
    RerollMask::from_positions((0..NUM_DICE).filter(|&k| {
        let v = dice[k];
        run_contains(v) && face_count[v as usize] > 1 && dice[..k].contains(&v)
    }))
}

/// Positions to reroll when chasing `goal` from `dice`.
pub fn goal_to_reroll(dice: &Dice, goal: Category) -> RerollMask {
    if let Some(pip) = goal.pip() {
        return reroll_all_but(dice, pip);
    }

    let face_count = count_faces(dice);
    let count_max = face_count.iter().copied().max().unwrap_or(0);
    let mode_max = (1..=NUM_FACES as u8)
        .rev()
        .find(|&f| face_count[f as usize] == count_max)
        .unwrap_or(1);
    let run = longest_run(dice);

    match goal {
        Category::ThreeOfAKind | Category::FourOfAKind => {
            if count_max == 3 {
                RerollMask::from_predicate(dice, |d| face_count[d as usize] != count_max && d < 4)
            } else {
                reroll_all_but(dice, mode_max)
            }
        }
        Category::FullHouse => {
            let by_appearance = counts_by_appearance(dice);
            let mut counts: Vec<u8> = by_appearance.iter().map(|&(_, n)| n).collect();
            counts.sort_unstable();
            match counts.as_slice() {
                [2, 3] => RerollMask::NONE,
                [5] => RerollMask::from_positions([3, 4]),
                [1, 4] => {
                    let first_of_four = dice.iter().position(|&d| d == mode_max).unwrap_or(0);
                    reroll_all_but(dice, mode_max)
                        .union(RerollMask::from_positions([first_of_four]))
                }
                _ => {
                    let mut ranked = by_appearance;
                    // Stable: equal counts keep appearance order, the last two win.
                    ranked.sort_by_key(|&(_, n)| n);
                    let keep: Vec<u8> = ranked.iter().rev().take(2).map(|&(v, _)| v).collect();
                    RerollMask::from_predicate(dice, |d| !keep.contains(&d))
                }
            }
        }
        Category::SmallStraight => {
            if run.len >= 4 {
                return RerollMask::NONE;
            }
            let dupes = run_duplicates(dice, &face_count, |v| run.contains(v));
            let outsiders = RerollMask::from_predicate(dice, |d| run.distance(d) > 2);
            dupes.union(outsiders)
        }
        Category::LargeStraight => {
            if run.len >= 5 {
                return RerollMask::NONE;
            }
            let faces: Vec<u8> = counts_by_appearance(dice).iter().map(|&(v, _)| v).collect();
            if faces == [1, 3, 5] || faces == [2, 4, 6] {
                return run_duplicates(dice, &face_count, |_| true);
            }
            let dupes = run_duplicates(dice, &face_count, |v| run.contains(v));
            let outsiders = RerollMask::from_predicate(dice, |d| {
                let dist = run.distance(d);
                (run.len <= 3 && dist > 2) || (run.len == 4 && dist > 1)
            });
            dupes.union(outsiders)
        }
        Category::Yahtzee => {
            if count_max == 5 {
                RerollMask::NONE
            } else {
                reroll_all_but(dice, mode_max)
            }
        }
        Category::Chance => RerollMask::from_predicate(dice, |d| d < 4),
        // Upper categories returned above.
        _ => RerollMask::NONE,
    }
}

/// [`goal_to_reroll`] for every goal in `goals`, indexed by category.
pub fn goals_to_rerolls(dice: &Dice, goals: CategorySet) -> [Option<RerollMask>; CATEGORY_COUNT] {
    let mut out = [None; CATEGORY_COUNT];
    for goal in goals.iter() {
        out[goal.index()] = Some(goal_to_reroll(dice, goal));
    }
    out
}
