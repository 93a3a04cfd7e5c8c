use serde::{Deserialize, Serialize};

use crate::models::difficulty::DifficultyKey;

/// Application settings from `settings.yaml` and `MYSTERE_*` environment variables
///
/// Paths are relative to the working directory unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory holding the key-value preference store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Directory containing the four sound files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    #[serde(default)]
    pub debug_mode: bool,

    /// Mirror log output to stderr
    #[serde(default)]
    pub console_logging: bool,

    #[serde(default)]
    pub default_difficulty: DifficultyKey,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_dir: default_log_dir(),
            audio_dir: default_audio_dir(),
            debug_mode: false,
            console_logging: false,
            default_difficulty: DifficultyKey::default(),
        }
    }
}

fn default_data_dir() -> String {
    "Mystere Data".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_audio_dir() -> String {
    "assets/audio".to_string()
}
