//! # Yahtzee: dice statistics and expected-value decision engine
//!
//! Plays solitaire Yahtzee with policies of increasing strength, backed by
//! exact dice statistics over the 252 order-independent rolls.
//!
//! ## Overview
//!
//! | Layer | Rust module | Description |
//! |-------|-------------|-------------|
//! | Rules | [`game_mechanics`], [`scorecard`] | Static category scoring; Joker rule, bonuses, final score |
//! | Index | [`dice_mechanics`] | Sorted rolls, srid lookup, sort/unsort permutations, longest run |
//! | Tables | [`phase0_tables`] | 252 × 13 score table and 252 × 32 × 252 reroll transition tensor |
//! | Evaluation | [`turn_evaluator`] | Exact expected best value after one reroll |
//! | Heuristics | [`simulation::heuristic`] | Goal category → dice to reroll |
//! | Rollouts | [`simulation::monte_carlo`] | Sampled goal values at rolls 1 and 2 |
//! | Policies | [`simulation::strategy`] | Random, greedy, Monte Carlo (sampled or tensor-backed) |
//! | Driver | [`simulation::engine`] | Full games and parallel batches |
//!
//! ## Identifiers
//!
//! - **srid** ∈ [0, 252): sorted roll, lexicographic order (`[1,1,1,1,1]` = 0,
//!   `[1,2,3,4,5]` = 76, `[6,6,6,6,6]` = 251)
//! - **rrid** ∈ [0, 32): reroll mask, bit k ⇒ position k rerolled
//!
//! Tables are built once into a [`YahtzeeContext`] ([`YahtzeeContext::build`])
//! and shared read-only afterwards; every game owns its own [`Scorecard`],
//! [`Turn`] and RNG.

#![allow(clippy::needless_range_loop)]

pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod game_mechanics;
pub mod phase0_tables;
pub mod scorecard;
pub mod simulation;
pub mod turn;
pub mod turn_evaluator;
pub mod types;

pub use scorecard::{GameError, RuleConfig, Scorecard};
pub use turn::Turn;
pub use types::{Category, CategorySet, Decision, Dice, RerollMask, YahtzeeContext};
