use std::time::{Duration, Instant};

/// Session statistics shown by the driver across restarts
#[derive(Debug)]
pub struct GameMetrics {
    round_start: Instant,
    /// Time spent in the current round, frozen once the snake dies
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            running: true,
        }
    }

    /// Refresh the round clock; a no-op after game over
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
