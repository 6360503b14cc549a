//! Per-game scorecard: recorded boxes, the Joker rule, and final scoring.
//!
//! The static 252 × 13 score table never sees scorecard state. The two rules
//! that do are applied here:
//!
//! - **Joker rule**: a Yahtzee rolled after the Yahtzee box already holds 50
//!   may be recorded at full value in 3K, 4K, full house and both straights,
//!   provided the upper box for its pip is already used (unless
//!   [`RuleConfig::joker_requires_upper`] is off).
//! - **Yahtzee bonus**: each such extra Yahtzee, whatever box it goes into,
//!   earns [`YAHTZEE_BONUS`] at game end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::dice_mechanics::is_yahtzee;
use crate::game_mechanics::{self, box_value, joker_categories, qualifying_categories};
use crate::types::{Category, CategorySet, Dice};

/// House-rule toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Unlock the lower-section Joker boxes for extra Yahtzees.
    #[serde(default = "default_true")]
    pub joker_rule: bool,
    /// Only allow the Joker once the matching upper box is used.
    #[serde(default = "default_true")]
    pub joker_requires_upper: bool,
    /// Count 100-point bonuses for extra Yahtzees.
    #[serde(default = "default_true")]
    pub yahtzee_bonus: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            joker_rule: true,
            joker_requires_upper: true,
            yahtzee_bonus: true,
        }
    }
}

/// Caller-logic errors. None of these are legal game situations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("category {0} already used")]
    CategoryUsed(Category),
    #[error("no rerolls left this turn")]
    NoRerollsLeft,
    #[error("no open categories")]
    NoOpenCategories,
    #[error("scorecard is complete")]
    GameComplete,
}

/// One player's scorecard for one game.
#[derive(Clone, Debug)]
pub struct Scorecard {
    scores: [i32; CATEGORY_COUNT],
    used: CategorySet,
    yahtzee_bonus_count: u32,
    rules: RuleConfig,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorecard {
    pub fn new() -> Self {
        Self::with_rules(RuleConfig::default())
    }

    pub fn with_rules(rules: RuleConfig) -> Self {
        Self {
            scores: [0; CATEGORY_COUNT],
            used: CategorySet::empty(),
            yahtzee_bonus_count: 0,
            rules,
        }
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn open_categories(&self) -> CategorySet {
        self.used.complement()
    }

    pub fn used_categories(&self) -> CategorySet {
        self.used
    }

    pub fn is_used(&self, cat: Category) -> bool {
        self.used.contains(cat)
    }

    pub fn is_complete(&self) -> bool {
        self.used == CategorySet::all()
    }

    /// Recorded score, or `None` while the box is open.
    pub fn recorded(&self, cat: Category) -> Option<i32> {
        self.used.contains(cat).then(|| self.scores[cat.index()])
    }

    pub fn yahtzee_bonus_count(&self) -> u32 {
        self.yahtzee_bonus_count
    }

    /// Yahtzee box already holds a nonzero score.
    fn yahtzee_scored(&self) -> bool {
        self.used.contains(Category::Yahtzee) && self.scores[Category::Yahtzee.index()] > 0
    }

    /// Whether the Joker boxes are unlocked for this roll.
    pub fn joker_unlocked(&self, dice: &Dice) -> bool {
        if !self.rules.joker_rule || !is_yahtzee(dice) || !self.yahtzee_scored() {
            return false;
        }
        if !self.rules.joker_requires_upper {
            return true;
        }
        Category::upper_for_pip(dice[0]).is_some_and(|upper| self.is_used(upper))
    }

    /// Whether the roll would trigger a Yahtzee bonus when recorded.
    pub fn earns_yahtzee_bonus(&self, dice: &Dice) -> bool {
        self.rules.yahtzee_bonus && is_yahtzee(dice) && self.yahtzee_scored()
    }

    /// Categories the roll may score nonzero in right now (any used state).
    pub fn qualifying(&self, dice: &Dice) -> CategorySet {
        let mut set = qualifying_categories(dice);
        if self.joker_unlocked(dice) {
            for cat in joker_categories().iter() {
                set.insert(cat);
            }
        }
        set
    }

    /// Score the roll would earn in a category given the current card.
    pub fn category_score(&self, dice: &Dice, cat: Category) -> i32 {
        if self.qualifying(dice).contains(cat) {
            box_value(dice, cat)
        } else {
            0
        }
    }

    /// Open categories the roll qualifies for, with their scores.
    pub fn score_candidates(&self, dice: &Dice) -> Vec<(Category, i32)> {
        let open = self.open_categories();
        game_mechanics::score_candidates(dice, self.joker_unlocked(dice))
            .into_iter()
            .filter(|&(c, _)| open.contains(c))
            .collect()
    }

    /// Override a static-table score with the live Joker value when it applies.
    ///
    /// `joker` is `self.joker_unlocked(dice)`, hoisted by callers that score
    /// the same roll in many boxes.
    #[inline]
    pub fn live_score(&self, dice: &Dice, cat: Category, table_score: i32, joker: bool) -> i32 {
        if joker && joker_categories().contains(cat) {
            box_value(dice, cat)
        } else {
            table_score
        }
    }

    /// Record the roll into an open category and return the score stored.
    pub fn apply_category(&mut self, cat: Category, dice: &Dice) -> Result<i32, GameError> {
        if self.is_used(cat) {
            return Err(GameError::CategoryUsed(cat));
        }
        let score = self.category_score(dice, cat);
        if self.earns_yahtzee_bonus(dice) {
            self.yahtzee_bonus_count += 1;
        }
        self.scores[cat.index()] = score;
        self.used.insert(cat);
        Ok(score)
    }

    pub fn upper_raw(&self) -> i32 {
        Category::UPPER.iter().map(|c| self.scores[c.index()]).sum()
    }

    pub fn upper_bonus(&self) -> i32 {
        if self.upper_raw() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    pub fn lower_raw(&self) -> i32 {
        self.scores[6..].iter().sum()
    }

    pub fn yahtzee_bonus(&self) -> i32 {
        YAHTZEE_BONUS * self.yahtzee_bonus_count as i32
    }

    /// Upper raw + upper bonus + lower raw + Yahtzee bonuses.
    pub fn final_score(&self) -> i32 {
        self.upper_raw() + self.upper_bonus() + self.lower_raw() + self.yahtzee_bonus()
    }
}
