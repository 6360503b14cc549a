//! Shared environment configuration for the simulation binary.
//!
//! Reads the house-rule toggles, the Monte Carlo sample count, and
//! `RAYON_NUM_THREADS`.

use crate::scorecard::RuleConfig;

/// Parse a boolean toggle: `1/0`, `true/false`, `on/off`, `yes/no`.
fn parse_flag(name: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(format!("Invalid value for {}: '{}'", name, other)),
    }
}

fn read_flag(name: &str, default: bool) -> Result<bool, String> {
    match std::env::var(name) {
        Ok(raw) => parse_flag(name, &raw),
        Err(_) => Ok(default),
    }
}

/// Rules from `YAHTZEE_JOKER_RULE`, `YAHTZEE_JOKER_REQUIRES_UPPER` and
/// `YAHTZEE_BONUS`; unset variables keep the defaults.
pub fn rules_from_env() -> Result<RuleConfig, String> {
    let defaults = RuleConfig::default();
    Ok(RuleConfig {
        joker_rule: read_flag("YAHTZEE_JOKER_RULE", defaults.joker_rule)?,
        joker_requires_upper: read_flag(
            "YAHTZEE_JOKER_REQUIRES_UPPER",
            defaults.joker_requires_upper,
        )?,
        yahtzee_bonus: read_flag("YAHTZEE_BONUS", defaults.yahtzee_bonus)?,
    })
}

/// `YAHTZEE_MC_SAMPLES`, if set. Must be a positive integer.
pub fn mc_samples_from_env() -> Result<Option<usize>, String> {
    match std::env::var("YAHTZEE_MC_SAMPLES") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(format!("Invalid value for YAHTZEE_MC_SAMPLES: '{}'", raw)),
        },
        Err(_) => Ok(None),
    }
}

fn rayon_threads_from_env() -> usize {
    std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8)
}

/// Read `RAYON_NUM_THREADS` (default 8) and build the global rayon pool.
/// Tolerates an already-initialized pool. Returns thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = rayon_threads_from_env();
    if rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .is_err()
    {
        eprintln!("Rayon pool already initialized; using {} threads", rayon::current_num_threads());
    }
    println!("Rayon threads: {}", num_threads);
    num_threads
}
