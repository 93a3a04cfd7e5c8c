// Game state module
//
// This module provides the GameController which owns the GameState, drives
// the guess state machine, fires sound cues and broadcasts GameEvents.

use crate::metrics::Metrics;
use crate::models::{
    DifficultyKey, GameError, GamePhase, GameSnapshot, GameState, GuessOutcome, GuessResult,
    parse_guess,
};
use crate::services::{SoundName, SoundPlayer};
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the game event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Events emitted when the game changes
///
/// The render layer subscribes to these instead of polling the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A new game began
    GameStarted {
        difficulty: DifficultyKey,
        min: i32,
        max: i32,
        max_attempts: u32,
    },

    /// A guess consumed an attempt
    GuessEvaluated {
        value: i32,
        outcome: GuessOutcome,
        attempts_used: u32,
        max_attempts: u32,
    },

    /// A guess was refused; nothing changed
    GuessRejected {
        reason: GameError,
    },

    GameWon {
        attempts_used: u32,
    },

    GameLost {
        secret: i32,
    },

    /// The player guessed 67
    EasterEgg,
}

/// Owner of the current game.
///
/// The controller is the only place a [`GameState`] is mutated. Sound cues go
/// to the injected [`SoundPlayer`] and never influence the game; events go to
/// every subscriber of [`subscribe()`](Self::subscribe).
///
/// # Usage
/// ```ignore
/// let mut controller = GameController::new(DifficultyKey::Normal, Rc::new(NoopSoundPlayer));
/// let mut rx = controller.subscribe();
/// let result = controller.submit_guess(50)?;
/// ```
pub struct GameController {
    state: GameState,
    rng: fastrand::Rng,
    sounds: Rc<dyn SoundPlayer>,
    event_tx: broadcast::Sender<GameEvent>,
    metrics: Arc<Metrics>,
}

impl GameController {
    /// Create a controller and start a first game at `difficulty`
    pub fn new(difficulty: DifficultyKey, sounds: Rc<dyn SoundPlayer>) -> Self {
        Self::with_rng(difficulty, sounds, fastrand::Rng::new())
    }

    /// Same as [`new`](Self::new) with a caller-provided random generator
    pub fn with_rng(difficulty: DifficultyKey, sounds: Rc<dyn SoundPlayer>, mut rng: fastrand::Rng) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = GameState::draw(difficulty, &mut rng);
        let metrics = Arc::new(Metrics::new());
        metrics.record_game_started();

        tracing::info!("Game controller ready, difficulty {}", difficulty);

        Self {
            state,
            rng,
            sounds,
            event_tx,
            metrics,
        }
    }

    /// Subscribe to game events
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Read-only view for the render layer
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Execute a function with read access to the game state
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&GameState) -> R,
    {
        f(&self.state)
    }

    pub fn difficulty(&self) -> DifficultyKey {
        self.state.difficulty()
    }

    /// Start a new game at `difficulty` with a freshly drawn secret
    pub fn new_game(&mut self, difficulty: DifficultyKey) -> GameSnapshot {
        let state = GameState::draw(difficulty, &mut self.rng);
        self.install(state)
    }

    /// Start a new game with a known secret.
    ///
    /// # Errors
    /// `SecretOutOfRange` when the secret does not fit the difficulty; the
    /// current game is left untouched.
    pub fn new_game_with_secret(
        &mut self,
        difficulty: DifficultyKey,
        secret: i32,
    ) -> Result<GameSnapshot, GameError> {
        let state = GameState::new(difficulty, secret)?;
        Ok(self.install(state))
    }

    /// Start over at the current difficulty
    pub fn restart(&mut self) -> GameSnapshot {
        self.new_game(self.state.difficulty())
    }

    fn install(&mut self, state: GameState) -> GameSnapshot {
        self.state = state;
        self.metrics.record_game_started();

        let profile = self.state.profile();
        tracing::info!(
            "New game: difficulty={}, range={}..={}, attempts={}",
            self.state.difficulty(),
            profile.min,
            profile.max,
            profile.max_attempts
        );

        self.emit(GameEvent::GameStarted {
            difficulty: self.state.difficulty(),
            min: profile.min,
            max: profile.max,
            max_attempts: profile.max_attempts,
        });

        self.state.snapshot()
    }

    /// Parse raw user input and submit it as a guess
    pub fn submit_raw(&mut self, input: &str) -> Result<GuessResult, GameError> {
        match parse_guess(input) {
            Ok(value) => self.submit_guess(value),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Evaluate a guess.
    ///
    /// # Returns
    /// The outcome, the attempts used, and the secret if the game was lost
    ///
    /// # Errors
    /// Invalid input or a finished game; neither changes the state
    pub fn submit_guess(&mut self, value: i32) -> Result<GuessResult, GameError> {
        let result = match self.state.evaluate(value) {
            Ok(result) => result,
            Err(e) => return Err(self.reject(e)),
        };

        self.metrics.record_guess_accepted();
        tracing::debug!(
            "Guess {} -> {:?} ({}/{})",
            value,
            result.outcome,
            result.attempts_used,
            result.max_attempts
        );

        if result.is_easter_egg() {
            self.metrics.record_easter_egg();
            self.emit(GameEvent::EasterEgg);
            self.sounds.play_sound(SoundName::EasterEgg67.as_str());
        }

        self.emit(GameEvent::GuessEvaluated {
            value,
            outcome: result.outcome,
            attempts_used: result.attempts_used,
            max_attempts: result.max_attempts,
        });

        match result.phase {
            GamePhase::Won => {
                tracing::info!("Game won in {} attempts", result.attempts_used);
                self.metrics.record_game_won();
                self.sounds.play_sound(SoundName::Correct.as_str());
                self.emit(GameEvent::GameWon {
                    attempts_used: result.attempts_used,
                });
            }
            GamePhase::Lost => {
                let secret = self.state.secret();
                tracing::info!("Game lost, the secret was {}", secret);
                self.metrics.record_game_lost();
                self.emit(GameEvent::GameLost { secret });
            }
            GamePhase::Ready => self.sounds.play_sound(SoundName::Wrong.as_str()),
        }

        Ok(result)
    }

    fn reject(&self, error: GameError) -> GameError {
        tracing::debug!("Guess rejected: {}", error);
        self.metrics.record_guess_rejected();
        self.emit(GameEvent::GuessRejected {
            reason: error.clone(),
        });
        error
    }

    fn emit(&self, event: GameEvent) {
        // Nobody listening is fine
        if self.event_tx.send(event).is_ok() {
            self.metrics.record_event_broadcast();
        }
    }
}
