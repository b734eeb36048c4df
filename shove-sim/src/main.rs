//! Shove Simulator
//!
//! Plays seeded self-play games, prints statistics and writes a ledger of
//! final-state fingerprints for `verify`.
//!
//! Usage: simulate [--games N] [--seed S] [--players P] [--board B]
//!                 [--trios T] [--wilds W] [--policy random|greedy]
//!                 [--max-moves M] [--out PATH] [--trace]

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use shove_core::GameConfig;
use shove_sim::{play_game, GameRecord, Ledger, Policy, SimStats};

/// Value following `flag`, parsed, or `default` if the flag is absent.
fn flag<T: FromStr>(args: &[String], name: &str, default: T) -> Result<T, String> {
    match args.iter().position(|a| a == name) {
        None => Ok(default),
        Some(i) => {
            let raw = args
                .get(i + 1)
                .ok_or_else(|| format!("{} needs a value", name))?;
            raw.parse()
                .map_err(|_| format!("invalid value for {}: {}", name, raw))
        }
    }
}

struct Options {
    games: u64,
    seed: u64,
    config: GameConfig,
    policy: Policy,
    max_moves: u32,
    out: PathBuf,
    trace: bool,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let defaults = GameConfig::default();
    let config = GameConfig {
        board_size: flag(args, "--board", defaults.board_size)?,
        players: flag(args, "--players", defaults.players)?,
        trios_per_player: flag(args, "--trios", defaults.trios_per_player)?,
        wilds_per_size: flag(args, "--wilds", defaults.wilds_per_size)?,
    };
    config.validate().map_err(|e| e.to_string())?;
    let policy = match args.iter().position(|a| a == "--policy") {
        None => Policy::Random,
        Some(i) => args
            .get(i + 1)
            .ok_or_else(|| "--policy needs a value".to_string())?
            .parse()?,
    };
    Ok(Options {
        games: flag(args, "--games", 1000)?,
        seed: flag(args, "--seed", 0)?,
        config,
        policy,
        max_moves: flag(args, "--max-moves", 1000)?,
        out: flag(args, "--out", PathBuf::from("data/ledger.bin"))?,
        trace: args.iter().any(|a| a == "--trace"),
    })
}

fn print_trace(record: &GameRecord) {
    println!("--- seed {} ---", record.seed);
    for (i, (player, placement)) in record.history.iter().enumerate() {
        println!("{:>4}. {} {}", i + 1, player, placement);
    }
    for standing in &record.standings {
        println!(
            "  #{} {} score={} captured={}",
            standing.rank, standing.player, standing.score, standing.captured
        );
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = match parse_options(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    println!("Shove Simulator");
    println!("===============");
    println!(
        "Board: {}x{}  Players: {}  Trios: {}  Wilds/size: {}",
        opts.config.board_size,
        opts.config.board_size,
        opts.config.players,
        opts.config.trios_per_player,
        opts.config.wilds_per_size
    );
    println!("Policy: {}  Games: {}  Seeds: {}..", opts.policy, opts.games, opts.seed);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, writing ledger...");
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: cannot set Ctrl-C handler: {}", e);
    }

    let log_interval_secs = 5;
    if let Some(parent) = opts.out.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let mut stats = SimStats::new();
    let mut ledger = Ledger::new(opts.config, opts.policy, opts.max_moves);
    let mut failed = false;
    let start = Instant::now();

    for seed in opts.seed..opts.seed.saturating_add(opts.games) {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let fingerprinted = play_game(opts.config, seed, opts.policy, opts.max_moves)
            .and_then(|record| record.fingerprint().map(|fp| (record, fp)));
        match fingerprinted {
            Ok((record, fp)) => {
                if opts.trace {
                    print_trace(&record);
                }
                stats.record(&record);
                ledger.push(seed, fp);
            }
            Err(e) => {
                eprintln!("Engine fault: {}", e);
                failed = true;
                break;
            }
        }

        if stats.should_log(log_interval_secs) {
            stats.log_progress(opts.games);
        }
    }

    println!("\n===============");
    println!("Run complete in {:.2}s", start.elapsed().as_secs_f64());
    println!("===============");
    stats.print_summary(opts.config.players);

    println!("\nSaving ledger to {:?}...", opts.out);
    let save_start = Instant::now();
    match ledger.save(&opts.out) {
        Ok(count) => {
            println!(
                "Saved {} games in {:.2}s",
                count,
                save_start.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            eprintln!("Error saving ledger: {}", e);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}
