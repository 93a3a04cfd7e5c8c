// Nombre Mystère - guess-the-number game with persistent audio preferences
//
// This is the library crate containing the game rules, audio and storage services.
// The binary crate (main.rs) provides the terminal entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AppSettings, AudioPreferences, DifficultyKey, GameSnapshot, GameState};
pub use services::{AudioManager, PreferenceStore};
pub use state::{GameController, GameEvent};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
