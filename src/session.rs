//! Bookkeeping that outlives a single game within one run of the program

use std::time::{Duration, Instant};

/// Timer for the current game plus best score across restarts
#[derive(Debug, Clone)]
pub struct SessionStats {
    started_at: Instant,
    elapsed: Duration,
    best_score: u32,
    games_finished: u32,
    game_over_recorded: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed: Duration::ZERO,
            best_score: 0,
            games_finished: 0,
            game_over_recorded: false,
        }
    }

    /// Refresh the elapsed time; frozen once the game is over
    pub fn update(&mut self) {
        if !self.game_over_recorded {
            self.elapsed = self.started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.elapsed = Duration::ZERO;
        self.game_over_recorded = false;
    }

    /// Record a finished game; repeated calls for the same game are ignored
    pub fn on_game_over(&mut self, final_score: u32) {
        if self.game_over_recorded {
            return;
        }

        self.update();
        self.game_over_recorded = true;
        self.games_finished += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time as `MM:SS`
    pub fn format_time(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
