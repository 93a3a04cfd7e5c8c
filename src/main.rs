//! Nombre Mystère - guess-the-number game for the terminal
//!
//! Main entry point for the terminal application.
//!
//! # Overview
//!
//! This binary crate wires the library together. It initializes:
//! - Settings ([`ConfigManager`]): defaults, `settings.yaml`, `MYSTERE_*` variables
//! - Logging infrastructure (daily rotating file + optional stderr output)
//! - Preference storage ([`FileStorage`], in memory if the data directory is unusable)
//! - Audio ([`AudioManager`] over rodio with the `playback` feature, silent otherwise)
//! - The game ([`GameController`]) and its terminal front end ([`TerminalController`])
//!
//! # Execution Flow
//!
//! 1. Load settings from `Mystere Data/settings.yaml` (written with defaults on first run)
//! 2. Initialize logging → `<log_dir>/mystere.<date>`
//! 3. Open the preference storage and the audio backend
//! 4. Create a current-thread tokio runtime
//! 5. Read commands from stdin until `quitter`, end of input or Ctrl+C
//! 6. Log the session summary

use anyhow::{Context, Result};
use camino::Utf8Path;
use mystere::services::{AudioBackend, SilentBackend};
use mystere::storage::{FileStorage, MemoryStorage};
use mystere::ui::{InputBridge, TerminalController};
use mystere::{APP_NAME, AudioManager, ConfigManager, GameController, PreferenceStore, VERSION};
use std::rc::Rc;

/// Directory holding `settings.yaml`
const CONFIG_DIR: &str = "Mystere Data";

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    config_manager.ensure_settings_file()?;
    let settings = config_manager.load_settings()?;

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = mystere::logging::setup_logging(&settings)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let store = open_preference_store(&settings.data_dir);

    // The backend must outlive the audio manager's handles
    let backend = open_audio_backend();
    let audio = Rc::new(AudioManager::new(
        store,
        backend.as_ref(),
        Utf8Path::new(&settings.audio_dir),
    ));

    let game = GameController::new(settings.default_difficulty, audio.clone());
    let controller = TerminalController::new(game, audio);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the tokio runtime")?;

    let result = runtime.block_on(controller.run(InputBridge::stdin(), std::io::stdout()));

    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("Terminal error: {}", e);
        e
    })
}

fn open_preference_store(data_dir: &str) -> PreferenceStore {
    match FileStorage::open(data_dir) {
        Ok(storage) => {
            tracing::info!("Preferences stored in {}", storage.path());
            PreferenceStore::new(storage)
        }
        Err(e) => {
            tracing::warn!(
                "Storage unavailable in {} ({}), preferences will not persist",
                data_dir,
                e
            );
            PreferenceStore::new(MemoryStorage::new())
        }
    }
}

#[cfg(feature = "playback")]
fn open_audio_backend() -> Box<dyn AudioBackend> {
    match mystere::services::RodioBackend::try_default() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            tracing::warn!("No audio output ({}), playing silently", e);
            Box::new(SilentBackend)
        }
    }
}

#[cfg(not(feature = "playback"))]
fn open_audio_backend() -> Box<dyn AudioBackend> {
    tracing::info!("Built without the playback feature, playing silently");
    Box::new(SilentBackend)
}
