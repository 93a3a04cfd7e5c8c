use serde::Serialize;
use thiserror::Error;

use crate::models::difficulty::{DifficultyKey, DifficultyProfile};

/// Guess value that triggers the "67" easter egg.
pub const EASTER_EGG_VALUE: i32 = 67;

/// Errors raised by the game state machine.
///
/// `OutOfRange` and `NotANumber` are the two kinds of invalid input; they
/// never consume an attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Guess {value} is outside {min}..={max}")]
    OutOfRange { value: i32, min: i32, max: i32 },

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("The game is over, start a new one to keep playing")]
    GameOver,

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Secret {secret} is outside {min}..={max}")]
    SecretOutOfRange { secret: i32, min: i32, max: i32 },
}

impl GameError {
    /// Whether the error is a rejected guess (bad number or bad range)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GameError::OutOfRange { .. } | GameError::NotANumber(_))
    }
}

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Accepting guesses
    Ready,
    /// The secret was found
    Won,
    /// The attempt budget ran out
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Ready
    }
}

/// Classification of a single guess against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct,
}

impl GuessOutcome {
    fn classify(value: i32, secret: i32) -> Self {
        match value.cmp(&secret) {
            std::cmp::Ordering::Less => GuessOutcome::TooLow,
            std::cmp::Ordering::Greater => GuessOutcome::TooHigh,
            std::cmp::Ordering::Equal => GuessOutcome::Correct,
        }
    }
}

/// One accepted guess and how it compared to the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    pub value: i32,
    pub outcome: GuessOutcome,
}

/// What `submit_guess` hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessResult {
    pub value: i32,
    pub outcome: GuessOutcome,
    pub attempts_used: u32,
    pub max_attempts: u32,
    pub phase: GamePhase,
    /// Only set when the game was lost
    pub revealed_secret: Option<i32>,
}

impl GuessResult {
    pub fn is_easter_egg(&self) -> bool {
        self.value == EASTER_EGG_VALUE
    }
}

/// State of one game: difficulty, secret, and the guesses made so far.
///
/// The attempt count is the length of the history, so the two can never
/// drift apart. Once the phase is terminal, `evaluate` refuses to mutate.
#[derive(Clone, Debug)]
pub struct GameState {
    difficulty: DifficultyKey,
    secret: i32,
    history: Vec<GuessRecord>,
    phase: GamePhase,
}

impl GameState {
    /// Start a game with a known secret.
    ///
    /// # Errors
    /// `SecretOutOfRange` if the secret does not fit the difficulty's range.
    pub fn new(difficulty: DifficultyKey, secret: i32) -> Result<Self, GameError> {
        let profile = difficulty.profile();
        if !profile.contains(secret) {
            return Err(GameError::SecretOutOfRange {
                secret,
                min: profile.min,
                max: profile.max,
            });
        }

        Ok(Self {
            difficulty,
            secret,
            history: Vec::with_capacity(profile.max_attempts as usize),
            phase: GamePhase::Ready,
        })
    }

    /// Start a game with a secret drawn uniformly from `[min, max]`.
    pub fn draw(difficulty: DifficultyKey, rng: &mut fastrand::Rng) -> Self {
        let profile = difficulty.profile();
        Self {
            difficulty,
            secret: rng.i32(profile.min..=profile.max),
            history: Vec::with_capacity(profile.max_attempts as usize),
            phase: GamePhase::Ready,
        }
    }

    /// Evaluate one guess and advance the state machine.
    ///
    /// # Errors
    /// - `GameOver` when the game already ended
    /// - `OutOfRange` when `value` is outside the profile range
    ///
    /// Neither error consumes an attempt.
    pub fn evaluate(&mut self, value: i32) -> Result<GuessResult, GameError> {
        if self.phase.is_terminal() {
            return Err(GameError::GameOver);
        }

        let profile = self.profile();
        if !profile.contains(value) {
            return Err(GameError::OutOfRange {
                value,
                min: profile.min,
                max: profile.max,
            });
        }

        let outcome = GuessOutcome::classify(value, self.secret);
        self.history.push(GuessRecord { value, outcome });

        let attempts_used = self.attempts();
        if outcome == GuessOutcome::Correct {
            self.phase = GamePhase::Won;
        } else if attempts_used >= profile.max_attempts {
            self.phase = GamePhase::Lost;
        }

        Ok(GuessResult {
            value,
            outcome,
            attempts_used,
            max_attempts: profile.max_attempts,
            phase: self.phase,
            revealed_secret: (self.phase == GamePhase::Lost).then_some(self.secret),
        })
    }

    pub fn difficulty(&self) -> DifficultyKey {
        self.difficulty
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn secret(&self) -> i32 {
        self.secret
    }

    pub fn attempts(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Read-only view for the render layer. The secret is only included
    /// once the game has ended.
    pub fn snapshot(&self) -> GameSnapshot {
        let profile = self.profile();
        GameSnapshot {
            difficulty: self.difficulty,
            min: profile.min,
            max: profile.max,
            attempts: self.attempts(),
            max_attempts: profile.max_attempts,
            history: self.history.clone(),
            phase: self.phase,
            secret: self.phase.is_terminal().then_some(self.secret),
        }
    }
}

/// Snapshot of a game as seen by the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub difficulty: DifficultyKey,
    pub min: i32,
    pub max: i32,
    pub attempts: u32,
    pub max_attempts: u32,
    pub history: Vec<GuessRecord>,
    pub phase: GamePhase,
    pub secret: Option<i32>,
}

impl GameSnapshot {
    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }
}

/// Parse raw user text into a guess.
///
/// Surrounding whitespace is ignored. Anything that is not a whole number
/// (including decimals such as `"42.5"`) is rejected.
pub fn parse_guess(input: &str) -> Result<i32, GameError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| GameError::NotANumber(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_secret_out_of_range() {
        let err = GameState::new(DifficultyKey::Facile, 51).unwrap_err();
        assert_eq!(
            err,
            GameError::SecretOutOfRange {
                secret: 51,
                min: 0,
                max: 50
            }
        );
    }

    #[test]
    fn test_evaluate_classifies() {
        let mut game = GameState::new(DifficultyKey::Normal, 40).unwrap();

        assert_eq!(game.evaluate(10).unwrap().outcome, GuessOutcome::TooLow);
        assert_eq!(game.evaluate(90).unwrap().outcome, GuessOutcome::TooHigh);
        let result = game.evaluate(40).unwrap();
        assert_eq!(result.outcome, GuessOutcome::Correct);
        assert_eq!(result.phase, GamePhase::Won);
        assert_eq!(result.attempts_used, 3);
        assert_eq!(result.revealed_secret, None);
    }

    #[test]
    fn test_out_of_range_consumes_nothing() {
        let mut game = GameState::new(DifficultyKey::Facile, 20).unwrap();

        let err = game.evaluate(75).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(game.attempts(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_terminal_state_rejects_guesses() {
        let mut game = GameState::new(DifficultyKey::Normal, 5).unwrap();
        game.evaluate(5).unwrap();

        assert_eq!(game.evaluate(5), Err(GameError::GameOver));
        assert_eq!(game.attempts(), 1);
    }

    #[test]
    fn test_loss_reveals_secret() {
        let mut game = GameState::new(DifficultyKey::Legendaire, 7).unwrap();
        let result = game.evaluate(42).unwrap();

        assert_eq!(result.outcome, GuessOutcome::TooHigh);
        assert_eq!(result.phase, GamePhase::Lost);
        assert_eq!(result.revealed_secret, Some(7));
        assert!(game.is_game_over());
    }

    #[test]
    fn test_correct_on_last_attempt_wins() {
        let mut game = GameState::new(DifficultyKey::Legendaire, 7).unwrap();
        let result = game.evaluate(7).unwrap();
        assert_eq!(result.phase, GamePhase::Won);
        assert_eq!(result.revealed_secret, None);
    }

    #[test]
    fn test_snapshot_hides_secret_until_over() {
        let mut game = GameState::new(DifficultyKey::Difficile, 30).unwrap();
        game.evaluate(10).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.secret, None);
        assert_eq!(snapshot.attempts, 1);
        assert_eq!(snapshot.attempts_left(), 4);
        assert_eq!(snapshot.history[0].outcome, GuessOutcome::TooLow);

        game.evaluate(30).unwrap();
        assert_eq!(game.snapshot().secret, Some(30));
    }

    #[test]
    fn test_draw_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(67);
        for _ in 0..500 {
            let game = GameState::draw(DifficultyKey::Facile, &mut rng);
            assert!((0..=50).contains(&game.secret()));
        }
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess(" 42 "), Ok(42));
        assert_eq!(parse_guess("-3"), Ok(-3));
        assert_eq!(parse_guess("abc"), Err(GameError::NotANumber("abc".to_string())));
        assert_eq!(parse_guess("42.5"), Err(GameError::NotANumber("42.5".to_string())));
        assert!(parse_guess("").unwrap_err().is_invalid_input());
    }
}
