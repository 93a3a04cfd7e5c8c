//! Data models for the Nombre Mystère game.
//!
//! - [`DifficultyKey`] / [`DifficultyProfile`]: the fixed difficulty registry
//! - [`GameState`]: one game's secret, history and phase, with the guess-evaluation rules
//! - [`AudioPreferences`]: the persisted audio settings record
//! - [`AppSettings`]: application settings loaded by [`ConfigManager`](crate::config::ConfigManager)
//!
//! Game state is owned by [`GameController`](crate::state::GameController); the
//! render layer only ever sees [`GameSnapshot`] values.

pub mod config;
pub mod difficulty;
pub mod game_state;
pub mod preferences;

pub use config::AppSettings;
pub use difficulty::{DifficultyKey, DifficultyProfile};
pub use game_state::{
    EASTER_EGG_VALUE, GameError, GamePhase, GameSnapshot, GameState, GuessOutcome, GuessRecord,
    GuessResult, parse_guess,
};
pub use preferences::{AUDIO_PREFERENCES_KEY, AudioPreferences, clamp_volume};
