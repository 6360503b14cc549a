//! Dice operations: rolling, sorting, face counts, and sort permutations.
//!
//! A roll keeps its die positions (policies name positions to reroll), while
//! all scoring and table lookups use the sorted form. [`SortedRoll`] carries
//! both directions of the permutation between the two.

use rand::Rng;

use crate::constants::*;
use crate::types::{Dice, RerollMask, YahtzeeContext};

/// Count occurrences of each face (1-6).
/// face_count[0] is unused; face_count[f] = count of face f.
pub fn count_faces(dice: &Dice) -> [u8; 7] {
    let mut face_count = [0u8; 7];
    for &d in dice {
        face_count[d as usize] += 1;
    }
    face_count
}

/// Normalize dice to canonical sorted form (ascending).
pub fn sort_dice_set(arr: &mut Dice) {
    for i in 0..4 {
        for j in (i + 1)..5 {
            if arr[j] < arr[i] {
                arr.swap(i, j);
            }
        }
    }
}

/// Sorted copy of a roll.
pub fn sorted(dice: &Dice) -> Dice {
    let mut out = *dice;
    sort_dice_set(&mut out);
    out
}

/// Sum of all five dice.
#[inline]
pub fn dice_sum(dice: &Dice) -> i32 {
    dice.iter().map(|&d| d as i32).sum()
}

/// True if all five dice show the same face.
#[inline]
pub fn is_yahtzee(dice: &Dice) -> bool {
    dice.iter().all(|&d| d == dice[0])
}

/// Roll five fresh dice (unsorted).
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R) -> Dice {
    let mut dice = [0u8; NUM_DICE];
    for d in &mut dice {
        *d = rng.random_range(1..=NUM_FACES as u8);
    }
    dice
}

/// Reroll the masked positions, leaving every other position untouched.
pub fn reroll<R: Rng + ?Sized>(dice: &Dice, mask: RerollMask, rng: &mut R) -> Dice {
    let mut out = *dice;
    for pos in mask.positions() {
        out[pos] = rng.random_range(1..=NUM_FACES as u8);
    }
    out
}

/// `out[i] = values[perm[i]]`.
pub fn apply_permutation(values: &Dice, perm: &[usize; NUM_DICE]) -> Dice {
    let mut out = [0u8; NUM_DICE];
    for i in 0..NUM_DICE {
        out[i] = values[perm[i]];
    }
    out
}

/// A roll's canonical form plus the permutations linking it to die positions.
///
/// - `sorted = apply_permutation(roll, sort_perm)`
/// - `roll = apply_permutation(sorted, unsort_perm)`
///
/// Equal faces keep their original relative order (stable sort), so the
/// round trip is exact for rolls with duplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortedRoll {
    pub sorted: Dice,
    pub srid: usize,
    pub sort_perm: [usize; NUM_DICE],
    pub unsort_perm: [usize; NUM_DICE],
}

impl SortedRoll {
    pub fn new(ctx: &YahtzeeContext, roll: &Dice) -> Self {
        let mut sort_perm = [0, 1, 2, 3, 4];
        sort_perm.sort_by_key(|&i| roll[i]);
        let mut unsort_perm = [0usize; NUM_DICE];
        for (sorted_pos, &orig_pos) in sort_perm.iter().enumerate() {
            unsort_perm[orig_pos] = sorted_pos;
        }
        let sorted = apply_permutation(roll, &sort_perm);
        Self {
            sorted,
            srid: ctx.srid(&sorted),
            sort_perm,
            unsort_perm,
        }
    }

    /// Restore the original roll from the sorted form.
    pub fn unsort(&self) -> Dice {
        apply_permutation(&self.sorted, &self.unsort_perm)
    }

    /// Translate a mask over original positions into the same dice's
    /// positions in the sorted roll (the frame the tensor is indexed by).
    pub fn to_sorted_mask(&self, mask: RerollMask) -> RerollMask {
        RerollMask::from_positions(mask.positions().map(|pos| self.unsort_perm[pos]))
    }
}

/// Longest run of consecutive distinct faces.
///
/// `min..=max()` spans the run; an empty roll gives `len == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongestRun {
    pub min: u8,
    pub len: u8,
}

impl LongestRun {
    #[inline]
    pub fn max(&self) -> u8 {
        (self.min + self.len).saturating_sub(1)
    }

    pub fn contains(&self, face: u8) -> bool {
        self.len > 0 && self.min <= face && face <= self.max()
    }

    /// Distance from the run to a face: 0 inside, else the gap to the nearest end.
    pub fn distance(&self, face: u8) -> u8 {
        if self.contains(face) {
            0
        } else if face < self.min {
            self.min - face
        } else {
            face - self.max()
        }
    }
}

/// Longest run of consecutive faces in a set of dice. The first
/// (lowest) run wins ties.
pub fn longest_run(dice: &[u8]) -> LongestRun {
    let mut present = [false; 8];
    for &d in dice {
        present[d as usize] = true;
    }

    let mut best = LongestRun { min: 0, len: 0 };
    let mut current = LongestRun { min: 0, len: 0 };
    for face in 1..=NUM_FACES as u8 {
        if present[face as usize] {
            if current.len == 0 {
                current.min = face;
            }
            current.len += 1;
            if current.len > best.len {
                best = current;
            }
        } else {
            current.len = 0;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase0_tables;

    fn make_ctx() -> Box<YahtzeeContext> {
        let mut ctx = YahtzeeContext::new_boxed();
        phase0_tables::build_all_dice_combinations(&mut ctx);
        ctx
    }

    #[test]
    fn test_sort_dice_set() {
        let mut d1 = [5, 3, 1, 4, 2];
        sort_dice_set(&mut d1);
        assert_eq!(d1, [1, 2, 3, 4, 5]);

        let mut d2 = [6, 5, 4, 3, 2];
        sort_dice_set(&mut d2);
        assert_eq!(d2, [2, 3, 4, 5, 6]);

        let mut d3 = [3, 3, 3, 3, 3];
        sort_dice_set(&mut d3);
        assert_eq!(d3, [3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_count_faces() {
        let fc = count_faces(&[1, 1, 2, 3, 3]);
        assert_eq!(fc[1], 2);
        assert_eq!(fc[2], 1);
        assert_eq!(fc[3], 2);
        assert_eq!(fc[4], 0);
        assert_eq!(fc[6], 0);
        assert_eq!(count_faces(&[6, 6, 6, 6, 6])[6], 5);
    }

    #[test]
    fn test_sort_then_unsort() {
        let ctx = make_ctx();
        for roll in [[1, 2, 3, 4, 5], [5, 4, 3, 2, 1], [3, 1, 4, 5, 2], [2, 6, 2, 1, 6]] {
            let sr = SortedRoll::new(&ctx, &roll);
            assert_eq!(apply_permutation(&roll, &sr.sort_perm), sr.sorted);
            assert_eq!(sr.unsort(), roll);
            assert_eq!(ctx.all_dice_sets[sr.srid], sr.sorted);
        }
    }

    #[test]
    fn test_sorted_roll_ids() {
        let ctx = make_ctx();
        assert_eq!(SortedRoll::new(&ctx, &[1, 1, 1, 1, 1]).srid, 0);
        assert_eq!(SortedRoll::new(&ctx, &[2, 1, 1, 1, 1]).srid, 1);
        assert_eq!(SortedRoll::new(&ctx, &[5, 4, 3, 2, 1]).srid, 76);
        assert_eq!(SortedRoll::new(&ctx, &[6, 6, 6, 6, 6]).srid, 251);
    }

    #[test]
    fn test_to_sorted_mask() {
        let ctx = make_ctx();
        // roll [3,1,4,5,2] sorts to [1,2,3,4,5]; the 4 sits at original position 2.
        let sr = SortedRoll::new(&ctx, &[3, 1, 4, 5, 2]);
        let mask = sr.to_sorted_mask(RerollMask::from_positions([2]));
        assert_eq!(mask.positions().collect::<Vec<_>>(), vec![3]);
        let mask = sr.to_sorted_mask(RerollMask::from_positions([0, 4]));
        assert_eq!(mask.positions().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(sr.to_sorted_mask(RerollMask::ALL), RerollMask::ALL);
    }

    #[test]
    fn test_reroll_keeps_unmasked() {
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let mut rng = SmallRng::seed_from_u64(7);
        let dice = [1, 2, 3, 4, 5];
        for _ in 0..100 {
            let out = reroll(&dice, RerollMask::from_positions([1, 3]), &mut rng);
            assert_eq!(out[0], 1);
            assert_eq!(out[2], 3);
            assert_eq!(out[4], 5);
            assert!((1..=6).contains(&out[1]) && (1..=6).contains(&out[3]));
        }
        assert_eq!(reroll(&dice, RerollMask::NONE, &mut rng), dice);
    }

    #[test]
    fn test_longest_run() {
        let run = |d: &[u8]| {
            let r = longest_run(d);
            (r.min, r.len)
        };
        assert_eq!(run(&[1]), (1, 1));
        assert_eq!(run(&[1, 2, 3, 4, 5]), (1, 5));
        assert_eq!(run(&[1, 1, 1, 1, 1]), (1, 1));
        assert_eq!(run(&[1, 2, 6, 6, 6]), (1, 2));
        assert_eq!(run(&[1, 3, 4, 6, 6]), (3, 2));
        assert_eq!(run(&[1, 3, 3, 5, 6]), (5, 2));
        assert_eq!(run(&[1, 1, 3, 4, 5]), (3, 3));
        assert_eq!(run(&[1, 3, 4, 5, 6]), (3, 4));
        assert_eq!(run(&[3, 3, 3, 3, 5]), (3, 1));
        assert_eq!(run(&[]), (0, 0));
    }

    #[test]
    fn test_run_distance() {
        let run = longest_run(&[3, 3, 4, 5, 6]);
        assert_eq!(run.distance(1), 2);
        assert_eq!(run.distance(2), 1);
        assert_eq!(run.distance(3), 0);
        assert!(run.contains(6));
        assert!(!run.contains(2));

        let single = longest_run(&[1, 1, 1, 1, 1]);
        assert_eq!(single.distance(1), 0);
        assert_eq!(single.distance(3), 2);
        assert_eq!(single.distance(6), 5);
    }
}
