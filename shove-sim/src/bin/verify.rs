//! Replay every game in a ledger and compare final-state fingerprints.
//!
//! Usage: verify [PATH]   (default data/ledger.bin)

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use shove_sim::{play_game, Ledger};

fn main() {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/ledger.bin"));

    println!("Loading ledger from {:?}...", path);
    let ledger = match Ledger::load(&path) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: failed to load ledger: {}", e);
            process::exit(2);
        }
    };
    println!(
        "{} games, board {}x{}, {} players, policy {}, move cap {}\n",
        ledger.len(),
        ledger.config.board_size,
        ledger.config.board_size,
        ledger.config.players,
        ledger.policy,
        ledger.max_moves
    );

    let start = Instant::now();
    let mut mismatches = 0usize;
    let mut errors = 0usize;
    for (i, &(seed, expected)) in ledger.entries.iter().enumerate() {
        let replayed = play_game(ledger.config, seed, ledger.policy, ledger.max_moves)
            .and_then(|record| record.fingerprint());
        match replayed {
            Ok(found) if found == expected => {}
            Ok(found) => {
                mismatches += 1;
                println!(
                    "MISMATCH seed={} expected={:016x} found={:016x}",
                    seed, expected, found
                );
            }
            Err(e) => {
                errors += 1;
                eprintln!("ERROR {}", e);
            }
        }
        if (i + 1) % 1000 == 0 {
            println!("  checked {}/{}", i + 1, ledger.len());
        }
    }

    println!("\nChecked {} games in {:.2}s", ledger.len(), start.elapsed().as_secs_f64());
    println!("  Mismatches: {}", mismatches);
    println!("  Errors:     {}", errors);

    if mismatches + errors > 0 {
        process::exit(1);
    }
    println!("All fingerprints match.");
}
