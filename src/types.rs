//! Core data structures: categories, reroll masks, and the precomputed context.
//!
//! The central type is [`YahtzeeContext`], which holds the canonical roll index,
//! the category score table, and the reroll transition tensor. It is built once
//! by [`crate::phase0_tables::precompute_lookup_tables`] and then shared
//! immutably (`&YahtzeeContext` or `Arc<YahtzeeContext>`) by every evaluator,
//! policy, and rayon worker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// An ordered roll of five dice, each in 1..=6.
pub type Dice = [u8; NUM_DICE];

/// One of the 13 scorecard boxes.
///
/// Discriminants are the dense category indices used by the score table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Aces = 0,
    Twos = 1,
    Threes = 2,
    Fours = 3,
    Fives = 4,
    Sixes = 5,
    ThreeOfAKind = 6,
    FourOfAKind = 7,
    FullHouse = 8,
    SmallStraight = 9,
    LargeStraight = 10,
    Yahtzee = 11,
    Chance = 12,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Category> {
        Category::ALL.get(index).copied()
    }

    /// Upper-section box for a pip value (1..=6).
    pub fn upper_for_pip(pip: u8) -> Option<Category> {
        match pip {
            1..=6 => Some(Category::UPPER[(pip - 1) as usize]),
            _ => None,
        }
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.index() < 6
    }

    /// Pip value counted by an upper-section box.
    pub fn pip(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "3 of a Kind",
            Category::FourOfAKind => "4 of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }

    /// Short scorecard code (`B1`..`B6`, `K3`, `K4`, `FH`, `SS`, `LS`, `Y`, `C`).
    pub fn code(self) -> &'static str {
        match self {
            Category::Aces => "B1",
            Category::Twos => "B2",
            Category::Threes => "B3",
            Category::Fours => "B4",
            Category::Fives => "B5",
            Category::Sixes => "B6",
            Category::ThreeOfAKind => "K3",
            Category::FourOfAKind => "K4",
            Category::FullHouse => "FH",
            Category::SmallStraight => "SS",
            Category::LargeStraight => "LS",
            Category::Yahtzee => "Y",
            Category::Chance => "C",
        }
    }

    /// Parse a scorecard code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Mean score of this box under optimal play.
    #[inline]
    pub fn reference_average(self) -> f64 {
        OPTIMAL_AVG_CATEGORY_SCORES[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of categories as a 13-bit mask (bit i = `Category::ALL[i]`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    const FULL: u16 = (1 << CATEGORY_COUNT) - 1;

    pub const fn empty() -> Self {
        CategorySet(0)
    }

    pub const fn all() -> Self {
        CategorySet(Self::FULL)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub fn contains(self, cat: Category) -> bool {
        self.0 & (1 << cat.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, cat: Category) {
        self.0 |= 1 << cat.index();
    }

    #[inline]
    pub fn remove(&mut self, cat: Category) {
        self.0 &= !(1 << cat.index());
    }

    pub fn with(mut self, cat: Category) -> Self {
        self.insert(cat);
        self
    }

    pub fn without(mut self, cat: Category) -> Self {
        self.remove(cat);
        self
    }

    /// Categories not in this set.
    pub fn complement(self) -> Self {
        CategorySet(!self.0 & Self::FULL)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Categories in index order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for cat in iter {
            set.insert(cat);
        }
        set
    }
}

/// Subset of die positions to reroll: bit k set ⇒ position k is rerolled.
///
/// The mask value is the rrid: 0 keeps everything, 31 rerolls all five dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RerollMask(u8);

impl RerollMask {
    pub const NONE: RerollMask = RerollMask(0);
    pub const ALL: RerollMask = RerollMask((1 << NUM_DICE) - 1);

    /// Mask for an rrid in 0..32. Higher bits are discarded.
    pub fn from_id(rrid: usize) -> Self {
        RerollMask((rrid as u8) & Self::ALL.0)
    }

    pub fn from_positions<I: IntoIterator<Item = usize>>(positions: I) -> Self {
        let mut mask = 0u8;
        for pos in positions {
            debug_assert!(pos < NUM_DICE, "die position {} out of range", pos);
            mask |= 1 << pos;
        }
        RerollMask(mask)
    }

    /// Mask selecting every position `i` where `pred(dice[i])` holds.
    pub fn from_predicate(dice: &Dice, pred: impl Fn(u8) -> bool) -> Self {
        Self::from_positions((0..NUM_DICE).filter(|&i| pred(dice[i])))
    }

    #[inline(always)]
    pub fn id(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn contains(self, pos: usize) -> bool {
        self.0 & (1 << pos) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: RerollMask) -> Self {
        RerollMask(self.0 | other.0)
    }

    /// Rerolled positions in ascending order.
    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..NUM_DICE).filter(move |&i| self.contains(i))
    }

    /// All 32 masks in rrid order.
    pub fn all_masks() -> impl Iterator<Item = RerollMask> {
        (0..NUM_REROLL_MASKS).map(RerollMask::from_id)
    }
}

/// Turn decision produced by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Reroll the masked positions (an empty mask spends the roll unchanged).
    Reroll(RerollMask),
    /// Record the current dice into an open category.
    Record(Category),
}

/// Reroll transition tensor `T[a][r][b]`, flat row-major f64 storage.
///
/// Row `(a, r)` is the distribution over destination sorted rolls after
/// rerolling mask `r` of canonical roll `a`.
pub struct TransitionTensor {
    pub probs: Vec<f64>,
}

impl Default for TransitionTensor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTensor {
    pub fn new() -> Self {
        Self {
            probs: vec![0.0; NUM_DICE_SETS * NUM_REROLL_MASKS * NUM_DICE_SETS],
        }
    }

    #[inline(always)]
    pub fn get(&self, srid: usize, rrid: usize, dest: usize) -> f64 {
        self.probs[transition_index(srid, rrid, dest)]
    }

    #[inline(always)]
    pub fn row(&self, srid: usize, rrid: usize) -> &[f64] {
        let start = transition_index(srid, rrid, 0);
        &self.probs[start..start + NUM_DICE_SETS]
    }

    /// Largest |Σ_b T[a][r][b] − 1| over all rows.
    pub fn max_row_deviation(&self) -> f64 {
        self.probs
            .chunks_exact(NUM_DICE_SETS)
            .map(|row| (row.iter().sum::<f64>() - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

/// Precomputed tables: canonical index, score table, transition tensor.
///
/// Roughly 16 MB, dominated by the tensor; heap-allocate with
/// [`YahtzeeContext::new_boxed`] or use [`YahtzeeContext::build`].
///
/// - `all_dice_sets[srid]` → sorted roll for each srid, lexicographic order
/// - `index_lookup[d1-1][d2-1][d3-1][d4-1][d5-1]` → srid of a sorted roll
/// - `precomputed_scores[srid][cat]` → static category score (no Joker rule)
/// - `transitions` → reroll transition tensor
pub struct YahtzeeContext {
    pub all_dice_sets: [Dice; NUM_DICE_SETS],
    pub num_combinations: usize,
    pub index_lookup: [[[[[u8; 6]; 6]; 6]; 6]; 6],
    pub precomputed_scores: [[i32; CATEGORY_COUNT]; NUM_DICE_SETS],
    pub transitions: TransitionTensor,
}

impl Default for YahtzeeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl YahtzeeContext {
    pub fn new() -> Self {
        Self {
            all_dice_sets: [[0; NUM_DICE]; NUM_DICE_SETS],
            num_combinations: 0,
            index_lookup: [[[[[0; 6]; 6]; 6]; 6]; 6],
            precomputed_scores: [[0; CATEGORY_COUNT]; NUM_DICE_SETS],
            transitions: TransitionTensor::new(),
        }
    }

    /// Allocate on the heap directly (avoids stack overflow in debug builds).
    pub fn new_boxed() -> Box<Self> {
        Box::new(Self::new())
    }

    /// Allocate and run every construction step.
    pub fn build() -> Box<Self> {
        let mut ctx = Self::new_boxed();
        crate::phase0_tables::precompute_lookup_tables(&mut ctx);
        ctx
    }

    /// srid of a sorted roll.
    #[inline(always)]
    pub fn srid(&self, sorted: &Dice) -> usize {
        debug_assert!(
            sorted.windows(2).all(|w| w[0] <= w[1]),
            "dice {:?} not sorted",
            sorted
        );
        self.index_lookup[(sorted[0] - 1) as usize][(sorted[1] - 1) as usize]
            [(sorted[2] - 1) as usize][(sorted[3] - 1) as usize][(sorted[4] - 1) as usize]
            as usize
    }

    /// Static score of srid in a category.
    #[inline(always)]
    pub fn score(&self, srid: usize, cat: Category) -> i32 {
        self.precomputed_scores[srid][cat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_code(cat.code()), Some(cat));
            assert_eq!(Category::from_index(cat.index()), Some(cat));
        }
        assert_eq!(Category::from_code("XX"), None);
        assert_eq!(Category::from_code(""), None);
        assert_eq!(Category::from_index(CATEGORY_COUNT), None);
    }

    #[test]
    fn test_category_pips() {
        assert_eq!(Category::Aces.pip(), Some(1));
        assert_eq!(Category::Sixes.pip(), Some(6));
        assert_eq!(Category::Chance.pip(), None);
        assert_eq!(Category::upper_for_pip(4), Some(Category::Fours));
        assert_eq!(Category::upper_for_pip(0), None);
        assert_eq!(Category::upper_for_pip(7), None);
    }

    #[test]
    fn test_category_set() {
        let mut set = CategorySet::empty();
        assert!(set.is_empty());
        set.insert(Category::Yahtzee);
        set.insert(Category::Aces);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Category::Yahtzee));
        assert!(!set.contains(Category::Chance));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Category::Aces, Category::Yahtzee]
        );
        assert_eq!(set.complement().len(), CATEGORY_COUNT - 2);
        set.remove(Category::Aces);
        assert_eq!(set, CategorySet::empty().with(Category::Yahtzee));
        assert_eq!(CategorySet::all().len(), CATEGORY_COUNT);
    }

    #[test]
    fn test_reroll_mask_ids() {
        assert_eq!(RerollMask::from_id(0), RerollMask::NONE);
        assert_eq!(RerollMask::from_id(31), RerollMask::ALL);
        assert_eq!(RerollMask::NONE.positions().count(), 0);
        assert_eq!(
            RerollMask::ALL.positions().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(
            RerollMask::from_id(0b00110).positions().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(RerollMask::from_positions([4, 0]).id(), 0b10001);
        assert_eq!(RerollMask::all_masks().count(), NUM_REROLL_MASKS);
        for (rrid, mask) in RerollMask::all_masks().enumerate() {
            assert_eq!(mask.id(), rrid);
            assert_eq!(mask.len(), rrid.count_ones() as usize);
        }
    }
}
