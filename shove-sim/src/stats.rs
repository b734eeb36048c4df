//! Simulation statistics tracking.

use std::time::Instant;

use crate::play::GameRecord;

/// Statistics collected across simulated games.
#[derive(Debug, Default)]
pub struct SimStats {
    /// Games played, finished or capped
    pub games: u64,

    /// Games stopped by the move cap
    pub aborted: u64,

    /// Placements across all games
    pub moves: u64,

    /// Longest game, in placements
    pub longest: u32,

    /// Cascade events
    pub shifts: u64,
    pub reclaims: u64,
    pub captures: u64,

    /// Wildcards that ended the game in a capture pile
    pub wilds_captured: u64,

    /// Outright wins per seat
    pub wins: [u64; 4],

    /// Finished games with more than one winner
    pub shared_wins: u64,

    /// Sum of the winning score over finished games
    pub winning_score_total: u64,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_games: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Fold one game into the totals
    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        self.moves += record.moves as u64;
        self.longest = self.longest.max(record.moves);
        self.shifts += record.shifts;
        self.reclaims += record.reclaims;
        self.captures += record.captures;
        self.wilds_captured += record.wilds_captured;

        if !record.finished {
            self.aborted += 1;
            return;
        }
        match record.winners.as_slice() {
            [] => {}
            [winner] => {
                if let Some(w) = self.wins.get_mut(winner.index()) {
                    *w += 1;
                }
            }
            _ => self.shared_wins += 1,
        }
        if let Some(top) = record.standings.first() {
            self.winning_score_total += top.score as u64;
        }
    }

    pub fn finished(&self) -> u64 {
        self.games - self.aborted
    }

    pub fn moves_per_game(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.moves as f64 / self.games as f64
    }

    /// Average winning score over finished games
    pub fn average_winning_score(&self) -> f64 {
        let finished = self.finished();
        if finished == 0 {
            return 0.0;
        }
        self.winning_score_total as f64 / finished as f64
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.games as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, target: u64) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Calculate rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let games = self.games - self.last_log_games;
            if elapsed > 0.0 {
                games as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.games_per_sec()
        };

        let done_pct = if target > 0 {
            100.0 * self.games as f64 / target as f64
        } else {
            0.0
        };

        println!(
            "[{:02}:{:02}:{:02}] games={}/{} ({:.1}%) rate={:.0}/s moves/game={:.1} capped={}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            target,
            done_pct,
            rate,
            self.moves_per_game(),
            self.aborted,
        );
        println!(
            "           cascade: shifts={} reclaims={} captures={}",
            self.shifts, self.reclaims, self.captures
        );

        self.last_log_time = Some(now);
        self.last_log_games = self.games;
    }

    /// Print final summary
    pub fn print_summary(&self, players: u8) {
        println!("Games played: {}", self.games);
        println!("  - Finished: {}", self.finished());
        println!("  - Hit move cap: {}", self.aborted);
        println!("Placements: {} ({:.1} per game, longest {})", self.moves, self.moves_per_game(), self.longest);
        println!("Shifts: {}", self.shifts);
        println!("Reclaims: {}", self.reclaims);
        println!("Captures: {}", self.captures);
        println!("Wildcards captured: {}", self.wilds_captured);
        for (seat, wins) in self.wins.iter().enumerate().take(players as usize) {
            println!("  - P{} wins: {}", seat + 1, wins);
        }
        println!("  - Shared wins: {}", self.shared_wins);
        println!("Average winning score: {:.2}", self.average_winning_score());

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!("Average rate: {:.0} games/sec", self.games as f64 / elapsed);
            }
        }
    }
}
