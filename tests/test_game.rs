//! End-to-end games with each policy.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use yahtzee::constants::*;
use yahtzee::simulation::{from_spec, play_turn, simulate_batch, simulate_game, GameRecord};
use yahtzee::{Category, CategorySet, GameError, RuleConfig, Scorecard, YahtzeeContext};

fn check_complete(record: &GameRecord) {
    assert_eq!(record.turns.len(), CATEGORY_COUNT);
    let used: CategorySet = record.turns.iter().map(|t| t.category).collect();
    assert_eq!(used, CategorySet::all(), "each category exactly once");
    assert!((0..=MAX_GAME_SCORE).contains(&record.total_score));
    for turn in &record.turns {
        assert!(!turn.rolls.is_empty() && turn.rolls.len() <= MAX_ROLLS_PER_TURN as usize);
        assert_eq!(turn.masks.len() + 1, turn.rolls.len());
    }
}

#[test]
fn test_fast_policy_full_game() {
    let ctx = YahtzeeContext::build();
    let policy = from_spec("mc-fast").unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);
    let record = simulate_game(&ctx, policy.as_ref(), RuleConfig::default(), &mut rng).unwrap();
    check_complete(&record);
}

#[test]
fn test_every_policy_completes() {
    let ctx = YahtzeeContext::build();
    for spec in ["random", "greedy", "mc-slow:2", "mc-fast:2"] {
        let policy = from_spec(spec).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let record = simulate_game(&ctx, policy.as_ref(), RuleConfig::default(), &mut rng)
            .unwrap_or_else(|e| panic!("{}: {}", spec, e));
        check_complete(&record);
    }
}

#[test]
fn test_seeded_games_are_deterministic() {
    let ctx = YahtzeeContext::build();
    let policy = from_spec("mc-slow:2").unwrap();
    let play = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        simulate_game(&ctx, policy.as_ref(), RuleConfig::default(), &mut rng).unwrap()
    };
    let a = play(99);
    let b = play(99);
    assert_eq!(a.total_score, b.total_score);
    assert_eq!(a.category_scores, b.category_scores);
    let rolls_a: Vec<_> = a.turns.iter().map(|t| t.rolls.clone()).collect();
    let rolls_b: Vec<_> = b.turns.iter().map(|t| t.rolls.clone()).collect();
    assert_eq!(rolls_a, rolls_b);
}

#[test]
fn test_monte_carlo_beats_random() {
    let ctx = YahtzeeContext::build();
    let random = from_spec("random").unwrap();
    let fast = from_spec("mc-fast:2").unwrap();
    let r = simulate_batch(&ctx, random.as_ref(), RuleConfig::default(), 20, 1, 0).unwrap();
    let f = simulate_batch(&ctx, fast.as_ref(), RuleConfig::default(), 20, 1, 0).unwrap();
    assert!(f.mean > r.mean, "mc-fast {} vs random {}", f.mean, r.mean);
}

#[test]
fn test_rules_reach_the_scorecard() {
    let ctx = YahtzeeContext::build();
    let policy = from_spec("greedy").unwrap();
    let rules = RuleConfig {
        joker_rule: false,
        joker_requires_upper: true,
        yahtzee_bonus: false,
    };
    let result = simulate_batch(&ctx, policy.as_ref(), rules, 50, 3, 0).unwrap();
    assert!(result.records.iter().all(|r| r.yahtzee_bonus == 0));
}

#[test]
fn test_record_twice_fails() {
    let mut card = Scorecard::new();
    card.apply_category(Category::FullHouse, &[2, 2, 3, 3, 3]).unwrap();
    assert_eq!(
        card.apply_category(Category::FullHouse, &[4, 4, 5, 5, 5]),
        Err(GameError::CategoryUsed(Category::FullHouse))
    );
    assert_eq!(card.final_score(), 25);
}

#[test]
fn test_extra_turn_fails() {
    let ctx = YahtzeeContext::build();
    let policy = from_spec("greedy").unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut card = Scorecard::new();
    for _ in 0..CATEGORY_COUNT {
        play_turn(&ctx, policy.as_ref(), &mut card, &mut rng).unwrap();
    }
    assert!(card.is_complete());
    assert_eq!(
        play_turn(&ctx, policy.as_ref(), &mut card, &mut rng).unwrap_err(),
        GameError::GameComplete
    );
}
