// Session metrics module
//
// Lightweight counters for one play session, logged on shutdown

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Per-session game metrics
///
/// Uses atomic counters so the metrics can be shared behind an `Arc` and
/// read from anywhere without locks.
#[derive(Debug)]
pub struct Metrics {
    /// Games started (initial game, difficulty changes and restarts)
    pub games_started: AtomicU64,

    pub games_won: AtomicU64,

    pub games_lost: AtomicU64,

    /// Guesses that consumed an attempt
    pub guesses_accepted: AtomicU64,

    /// Guesses rejected as invalid input or after the game ended
    pub guesses_rejected: AtomicU64,

    pub easter_eggs: AtomicU64,

    /// Game events sent to at least one subscriber
    pub events_broadcast: AtomicU64,

    /// Session start time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            games_started: AtomicU64::new(0),
            games_won: AtomicU64::new(0),
            games_lost: AtomicU64::new(0),
            guesses_accepted: AtomicU64::new(0),
            guesses_rejected: AtomicU64::new(0),
            easter_eggs: AtomicU64::new(0),
            events_broadcast: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_game_started(&self) {
        self.games_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_game_won(&self) {
        self.games_won.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_game_lost(&self) {
        self.games_lost.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_guess_accepted(&self) {
        self.guesses_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_guess_rejected(&self) {
        self.guesses_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_easter_egg(&self) {
        self.easter_eggs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_broadcast(&self) {
        self.events_broadcast.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of finished games that were won, 0.0 when none finished
    pub fn win_rate(&self) -> f64 {
        let won = self.games_won.load(Ordering::Relaxed);
        let finished = won + self.games_lost.load(Ordering::Relaxed);
        if finished > 0 {
            won as f64 / finished as f64
        } else {
            0.0
        }
    }

    /// Average attempts per started game
    pub fn avg_guesses_per_game(&self) -> f64 {
        let games = self.games_started.load(Ordering::Relaxed);
        if games > 0 {
            self.guesses_accepted.load(Ordering::Relaxed) as f64 / games as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Games: {} started, {} won, {} lost (win rate {:.0}%)",
            self.games_started.load(Ordering::Relaxed),
            self.games_won.load(Ordering::Relaxed),
            self.games_lost.load(Ordering::Relaxed),
            self.win_rate() * 100.0
        );
        tracing::info!(
            "Guesses: {} accepted, {} rejected, {:.1} per game, {} easter eggs",
            self.guesses_accepted.load(Ordering::Relaxed),
            self.guesses_rejected.load(Ordering::Relaxed),
            self.avg_guesses_per_game(),
            self.easter_eggs.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Events broadcast: {}",
            self.events_broadcast.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
