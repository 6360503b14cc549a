//! Statistics aggregation from simulation records.
//!
//! Summarizes a batch: total score distribution, per-category means and zero
//! rates next to the optimal-play reference figures, bonus rates, and reroll
//! usage. Saved as pretty-printed JSON.

use serde::Serialize;
use std::path::Path;

use crate::constants::*;
use crate::types::Category;

use super::engine::SimulationResult;

// ── Top-level statistics ────────────────────────────────────────────

#[derive(Serialize)]
pub struct GameStatistics {
    pub policy: String,
    pub num_games: usize,
    pub discarded_games: usize,
    pub seed: u64,
    pub elapsed_secs: f64,
    pub total_score: ScoreDistribution,
    pub categories: Vec<CategoryStatistics>,
    pub bonuses: BonusStatistics,
    pub rerolls: RerollStatistics,
}

#[derive(Serialize)]
pub struct ScoreDistribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
    pub median: i32,
    pub percentiles: Percentiles,
}

#[derive(Serialize)]
pub struct Percentiles {
    pub p5: i32,
    pub p10: i32,
    pub p25: i32,
    pub p50: i32,
    pub p75: i32,
    pub p90: i32,
    pub p95: i32,
    pub p99: i32,
}

// ── Per-category statistics ─────────────────────────────────────────

#[derive(Serialize)]
pub struct CategoryStatistics {
    pub category: Category,
    pub code: &'static str,
    pub name: &'static str,
    pub mean_score: f64,
    pub zero_rate: f64,
    /// Mean under optimal play.
    pub reference_mean: f64,
    /// Zero rate under optimal play.
    pub reference_zero_rate: f64,
}

// ── Bonuses ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BonusStatistics {
    pub upper_bonus_rate: f64,
    pub mean_upper_bonus: f64,
    pub reference_upper_bonus_rate: f64,
    pub reference_mean_upper_bonus: f64,
    pub yahtzee_bonus_rate: f64,
    pub mean_yahtzee_bonus: f64,
    pub reference_yahtzee_bonus_rate: f64,
    pub reference_mean_yahtzee_bonus: f64,
}

// ── Rerolls ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RerollStatistics {
    pub mean_per_game: f64,
    /// Share of turns that used 0, 1 and 2 rerolls.
    pub per_turn_distribution: [f64; 3],
}

/// Value at percentile `p` of ascending `sorted` (nearest rank).
fn percentile(sorted: &[i32], p: f64) -> i32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn rate(count: usize, n: f64) -> f64 {
    if n > 0.0 {
        count as f64 / n
    } else {
        0.0
    }
}

/// Aggregate a finished batch.
pub fn aggregate_statistics(result: &SimulationResult, seed: u64) -> GameStatistics {
    let records = &result.records;
    let n = records.len() as f64;
    let scores = &result.scores;

    let total_score = ScoreDistribution {
        mean: result.mean,
        std_dev: result.std_dev,
        min: result.min,
        max: result.max,
        median: result.median,
        percentiles: Percentiles {
            p5: percentile(scores, 5.0),
            p10: percentile(scores, 10.0),
            p25: percentile(scores, 25.0),
            p50: percentile(scores, 50.0),
            p75: percentile(scores, 75.0),
            p90: percentile(scores, 90.0),
            p95: percentile(scores, 95.0),
            p99: percentile(scores, 99.0),
        },
    };

    let categories = Category::ALL
        .iter()
        .map(|&cat| {
            let c = cat.index();
            let sum: i64 = records.iter().map(|r| r.category_scores[c] as i64).sum();
            let zeros = records.iter().filter(|r| r.category_scores[c] == 0).count();
            CategoryStatistics {
                category: cat,
                code: cat.code(),
                name: cat.name(),
                mean_score: if n > 0.0 { sum as f64 / n } else { 0.0 },
                zero_rate: rate(zeros, n),
                reference_mean: OPTIMAL_AVG_CATEGORY_SCORES[c],
                reference_zero_rate: OPTIMAL_ZERO_SCORE_PROB[c],
            }
        })
        .collect();

    let upper_hits = records.iter().filter(|r| r.upper_bonus > 0).count();
    let yahtzee_hits = records.iter().filter(|r| r.yahtzee_bonus > 0).count();
    let upper_sum: i64 = records.iter().map(|r| r.upper_bonus as i64).sum();
    let yahtzee_sum: i64 = records.iter().map(|r| r.yahtzee_bonus as i64).sum();
    let bonuses = BonusStatistics {
        upper_bonus_rate: rate(upper_hits, n),
        mean_upper_bonus: if n > 0.0 { upper_sum as f64 / n } else { 0.0 },
        reference_upper_bonus_rate: 1.0 - OPTIMAL_ZERO_UPPER_BONUS_PROB,
        reference_mean_upper_bonus: OPTIMAL_AVG_UPPER_BONUS,
        yahtzee_bonus_rate: rate(yahtzee_hits, n),
        mean_yahtzee_bonus: if n > 0.0 { yahtzee_sum as f64 / n } else { 0.0 },
        reference_yahtzee_bonus_rate: 1.0 - OPTIMAL_ZERO_YAHTZEE_BONUS_PROB,
        reference_mean_yahtzee_bonus: OPTIMAL_AVG_YAHTZEE_BONUS,
    };

    let mut turn_counts = [0usize; 3];
    let mut total_rerolls = 0usize;
    for turn in records.iter().flat_map(|r| r.turns.iter()) {
        let k = turn.masks.len().min(2);
        turn_counts[k] += 1;
        total_rerolls += turn.masks.len();
    }
    let num_turns = turn_counts.iter().sum::<usize>() as f64;
    let rerolls = RerollStatistics {
        mean_per_game: if n > 0.0 { total_rerolls as f64 / n } else { 0.0 },
        per_turn_distribution: turn_counts.map(|c| rate(c, num_turns)),
    };

    GameStatistics {
        policy: result.policy.clone(),
        num_games: records.len(),
        discarded_games: result.discarded,
        seed,
        elapsed_secs: result.elapsed.as_secs_f64(),
        total_score,
        categories,
        bonuses,
        rerolls,
    }
}

/// Save aggregated statistics as JSON, creating parent directories.
pub fn save_statistics(stats: &GameStatistics, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::{GameRecord, TurnRecord};

    fn make_record(upper: i32, chance: i32, yahtzee_bonus: i32, rerolls: usize) -> GameRecord {
        let mut category_scores = [0; CATEGORY_COUNT];
        category_scores[Category::Sixes.index()] = upper;
        category_scores[Category::Chance.index()] = chance;
        let upper_bonus = if upper >= UPPER_BONUS_THRESHOLD { UPPER_BONUS } else { 0 };
        let turns = Category::ALL
            .iter()
            .map(|&cat| TurnRecord {
                rolls: vec![[1, 2, 3, 4, 5]; rerolls + 1],
                masks: vec![0; rerolls],
                category: cat,
                score: category_scores[cat.index()],
                yahtzee_bonus: false,
            })
            .collect();
        GameRecord {
            turns,
            category_scores,
            upper_raw: upper,
            upper_bonus,
            yahtzee_bonus,
            total_score: upper + chance + upper_bonus + yahtzee_bonus,
        }
    }

    fn make_result(records: Vec<GameRecord>) -> SimulationResult {
        let mut scores: Vec<i32> = records.iter().map(|r| r.total_score).collect();
        scores.sort_unstable();
        let n = scores.len() as f64;
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n;
        SimulationResult {
            policy: "test".to_string(),
            min: scores[0],
            max: scores[scores.len() - 1],
            median: scores[scores.len() / 2],
            scores,
            records,
            mean,
            std_dev: 0.0,
            discarded: 1,
            elapsed: std::time::Duration::from_millis(10),
        }
    }

    #[test]
    fn test_percentile() {
        let sorted: Vec<i32> = (1..=101).collect();
        assert_eq!(percentile(&sorted, 0.0), 1);
        assert_eq!(percentile(&sorted, 50.0), 51);
        assert_eq!(percentile(&sorted, 100.0), 101);
        assert_eq!(percentile(&[], 50.0), 0);
    }

    #[test]
    fn test_aggregate() {
        let result = make_result(vec![
            make_record(30, 20, 0, 0),
            make_record(70, 0, 100, 2),
            make_record(30, 10, 0, 1),
            make_record(30, 30, 0, 2),
        ]);
        let stats = aggregate_statistics(&result, 7);
        assert_eq!(stats.num_games, 4);
        assert_eq!(stats.discarded_games, 1);
        assert_eq!(stats.seed, 7);

        let chance = &stats.categories[Category::Chance.index()];
        assert_eq!(chance.code, "C");
        assert!((chance.mean_score - 15.0).abs() < 1e-12);
        assert!((chance.zero_rate - 0.25).abs() < 1e-12);
        assert_eq!(chance.reference_mean, 22.01);
        assert_eq!(stats.categories[Category::Aces.index()].zero_rate, 1.0);

        assert!((stats.bonuses.upper_bonus_rate - 0.25).abs() < 1e-12);
        assert!((stats.bonuses.mean_yahtzee_bonus - 25.0).abs() < 1e-12);
        assert!((stats.bonuses.reference_upper_bonus_rate - 0.6812).abs() < 1e-12);

        assert!((stats.rerolls.mean_per_game - 13.0 * 5.0 / 4.0).abs() < 1e-12);
        assert!((stats.rerolls.per_turn_distribution[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_save_statistics_json() {
        let result = make_result(vec![make_record(63, 22, 0, 1)]);
        let stats = aggregate_statistics(&result, 0);
        let dir = std::env::temp_dir().join(format!("yahtzee-stats-{}", std::process::id()));
        let path = dir.join("stats.json");
        save_statistics(&stats, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["policy"], "test");
        assert_eq!(json["num_games"], 1);
        assert_eq!(json["categories"][12]["category"], "Chance");
        assert_eq!(json["bonuses"]["upper_bonus_rate"], 1.0);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
