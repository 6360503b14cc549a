use std::path::PathBuf;
use std::time::Instant;

use yahtzee::env_config;
use yahtzee::simulation::{aggregate_statistics, from_spec, save_statistics, simulate_batch};
use yahtzee::types::YahtzeeContext;
use yahtzee::RuleConfig;

const USAGE: &str = "Usage: yahtzee-simulate [--games N] [--seed S] [--policy SPEC] [--output DIR] [--min-score N] [--no-joker] [--joker-anywhere] [--no-yahtzee-bonus]";

struct Args {
    num_games: usize,
    seed: u64,
    policy: String,
    output: Option<PathBuf>,
    min_score: i32,
    no_joker: bool,
    joker_anywhere: bool,
    no_yahtzee_bonus: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    let Some(raw) = value else {
        eprintln!("Missing value for {}", flag);
        std::process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        std::process::exit(1);
    })
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        num_games: 1000,
        seed: 42,
        policy: "mc-fast".to_string(),
        output: None,
        min_score: 0,
        no_joker: false,
        joker_anywhere: false,
        no_yahtzee_bonus: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                parsed.num_games = parse_value("--games", args.get(i));
            }
            "--seed" => {
                i += 1;
                parsed.seed = parse_value("--seed", args.get(i));
            }
            "--policy" => {
                i += 1;
                parsed.policy = parse_value("--policy", args.get(i));
            }
            "--output" => {
                i += 1;
                parsed.output = Some(parse_value("--output", args.get(i)));
            }
            "--min-score" => {
                i += 1;
                parsed.min_score = parse_value("--min-score", args.get(i));
            }
            "--no-joker" => parsed.no_joker = true,
            "--joker-anywhere" => parsed.joker_anywhere = true,
            "--no-yahtzee-bonus" => parsed.no_yahtzee_bonus = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --games N            Number of games to play (default: 1000)");
                println!("  --seed S             RNG seed (default: 42)");
                println!("  --policy SPEC        random, greedy, mc-slow[:N], mc-fast[:N] (default: mc-fast)");
                println!("  --output DIR         Write game_statistics.json to DIR");
                println!("  --min-score N        Discard games scoring below N");
                println!("  --no-joker           Disable the Joker rule");
                println!("  --joker-anywhere     Joker does not require the matching upper box");
                println!("  --no-yahtzee-bonus   Disable 100-point bonuses for extra Yahtzees");
                println!();
                println!("Environment: YAHTZEE_JOKER_RULE, YAHTZEE_JOKER_REQUIRES_UPPER, YAHTZEE_BONUS,");
                println!("             YAHTZEE_MC_SAMPLES, RAYON_NUM_THREADS");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

/// Environment rules, then command-line overrides.
fn resolve_rules(args: &Args) -> Result<RuleConfig, String> {
    let mut rules = env_config::rules_from_env()?;
    if args.no_joker {
        rules.joker_rule = false;
    }
    if args.joker_anywhere {
        rules.joker_requires_upper = false;
    }
    if args.no_yahtzee_bonus {
        rules.yahtzee_bonus = false;
    }
    Ok(rules)
}

/// Apply `YAHTZEE_MC_SAMPLES` to a Monte Carlo spec without an explicit count.
fn resolve_policy_spec(spec: &str) -> Result<String, String> {
    let is_mc = spec == "mc-slow" || spec == "mc-fast";
    match env_config::mc_samples_from_env()? {
        Some(n) if is_mc => Ok(format!("{}:{}", spec, n)),
        _ => Ok(spec.to_string()),
    }
}

fn run(args: Args) -> Result<(), String> {
    let rules = resolve_rules(&args)?;
    let policy = from_spec(&resolve_policy_spec(&args.policy)?)?;
    let num_threads = env_config::init_rayon_threads();

    println!("Yahtzee Simulation ({} games)", args.num_games);
    println!("  Policy: {}", policy.name());
    println!(
        "  Rules:  joker={} joker_requires_upper={} yahtzee_bonus={}",
        rules.joker_rule, rules.joker_requires_upper, rules.yahtzee_bonus
    );
    if args.min_score > 0 {
        println!("  Min score: {}", args.min_score);
    }
    println!();

    let ctx = YahtzeeContext::build();

    println!(
        "Simulating {} games ({} threads)...",
        args.num_games, num_threads
    );
    let result = simulate_batch(
        &ctx,
        policy.as_ref(),
        rules,
        args.num_games,
        args.seed,
        args.min_score,
    )
    .map_err(|e| format!("Simulation failed: {}", e))?;

    let secs = result.elapsed.as_secs_f64();
    println!("  Elapsed:     {:.1} ms", secs * 1000.0);
    if args.num_games > 0 && secs > 0.0 {
        println!("  Per game:    {:.1} \u{00b5}s", secs * 1e6 / args.num_games as f64);
        println!("  Throughput:  {:.0} games/sec", args.num_games as f64 / secs);
    }
    println!();

    let stats = aggregate_statistics(&result, args.seed);

    println!("Results (policy: {}):", result.policy);
    println!("  Games kept:  {}", result.records.len());
    if result.discarded > 0 {
        println!(
            "  Discarded:   {} (score < {})",
            result.discarded, args.min_score
        );
    }
    println!("  Mean score:  {:.2}", result.mean);
    println!("  Std dev:     {:.1}", result.std_dev);
    println!("  Min:         {}", result.min);
    println!("  Max:         {}", result.max);
    println!("  Median:      {}", result.median);
    println!(
        "  Upper bonus: {:.1}% (optimal {:.1}%)",
        stats.bonuses.upper_bonus_rate * 100.0,
        stats.bonuses.reference_upper_bonus_rate * 100.0
    );
    println!(
        "  Yahtzee bonus mean: {:.2} (optimal {:.2})",
        stats.bonuses.mean_yahtzee_bonus, stats.bonuses.reference_mean_yahtzee_bonus
    );
    println!();
    println!("  {:<16} {:>8} {:>8} {:>8} {:>8}", "Category", "Mean", "Opt", "Zero%", "Opt%");
    for c in &stats.categories {
        println!(
            "  {:<16} {:>8.2} {:>8.2} {:>7.1}% {:>7.1}%",
            c.name,
            c.mean_score,
            c.reference_mean,
            c.zero_rate * 100.0,
            c.reference_zero_rate * 100.0
        );
    }

    if let Some(dir) = args.output {
        let path = dir.join("game_statistics.json");
        save_statistics(&stats, &path)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        println!();
        println!("  Statistics:  {}", path.display());
    }
    Ok(())
}

fn main() {
    let start = Instant::now();
    if let Err(e) = run(parse_args()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!();
    println!("Total time: {:.2} s", start.elapsed().as_secs_f64());
}
