//! Turn state: the current dice and how many rolls have been spent.

use rand::Rng;

use crate::constants::MAX_ROLLS_PER_TURN;
use crate::dice_mechanics::{reroll, roll_dice};
use crate::scorecard::GameError;
use crate::types::{Dice, RerollMask};

/// Dice and roll number (1..=3) within one category-filling turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    dice: Dice,
    roll_num: u8,
}

impl Turn {
    /// Start a turn from an initial roll.
    pub fn new(dice: Dice) -> Self {
        Self { dice, roll_num: 1 }
    }

    /// Start a turn mid-way, e.g. to evaluate a position at roll 2.
    ///
    /// # Panics
    /// If `roll_num` is outside 1..=3.
    pub fn at_roll(dice: Dice, roll_num: u8) -> Self {
        assert!(
            (1..=MAX_ROLLS_PER_TURN).contains(&roll_num),
            "roll number {} out of range",
            roll_num
        );
        Self { dice, roll_num }
    }

    /// Roll five fresh dice.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(roll_dice(rng))
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn roll_num(&self) -> u8 {
        self.roll_num
    }

    pub fn rerolls_left(&self) -> u8 {
        MAX_ROLLS_PER_TURN - self.roll_num
    }

    pub fn can_reroll(&self) -> bool {
        self.roll_num < MAX_ROLLS_PER_TURN
    }

    /// Reroll the masked positions. An empty mask still spends the roll.
    pub fn reroll<R: Rng + ?Sized>(
        &mut self,
        mask: RerollMask,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if !self.can_reroll() {
            return Err(GameError::NoRerollsLeft);
        }
        self.dice = reroll(&self.dice, mask, rng);
        self.roll_num += 1;
        Ok(())
    }
}
