//! Integration tests for the terminal front end
//!
//! These tests drive a whole session through `TerminalController` the way
//! the binary does: scripted input lines in, rendered text out.

use camino::Utf8Path;
use mystere::services::{AudioManager, PreferenceStore, SilentBackend, SoundName};
use mystere::storage::MemoryStorage;
use mystere::ui::{InputBridge, TerminalController};
use mystere::{DifficultyKey, GameController};
use std::io::Cursor;
use std::rc::Rc;

fn session(key: DifficultyKey, secret: i32, storage: MemoryStorage) -> TerminalController {
    let audio = Rc::new(AudioManager::new(
        PreferenceStore::new(storage),
        &SilentBackend,
        Utf8Path::new("assets/audio"),
    ));
    let mut game = GameController::new(key, audio.clone());
    game.new_game_with_secret(key, secret).unwrap();
    TerminalController::new(game, audio)
}

#[test]
fn test_easter_egg_banner_before_feedback() {
    let mut controller = session(DifficultyKey::Normal, 80, MemoryStorage::new());

    let response = controller.handle_line("67");
    assert_eq!(response.lines.len(), 3);
    assert_eq!(response.lines[0].matches("67").count(), 67);
    assert_eq!(response.lines[1], "Trop petit !");
    assert_eq!(response.lines[2], "Tentatives : 1 / 10");
    assert_eq!(
        controller.audio().status(SoundName::EasterEgg67).unwrap().play_count,
        1
    );
}

#[test]
fn test_restart_after_loss() {
    let mut controller = session(DifficultyKey::Legendaire, 7, MemoryStorage::new());
    controller.handle_line("42");

    let response = controller.handle_line("recommencer");
    assert!(response.lines[0].starts_with("Nouvelle partie : Légendaire"));
    let snapshot = controller.game().snapshot();
    assert_eq!(snapshot.difficulty, DifficultyKey::Legendaire);
    assert_eq!(snapshot.attempts, 0);
    assert_eq!(snapshot.secret, None);
}

#[test]
fn test_audio_toggles_are_persisted() {
    let storage = MemoryStorage::new();
    let mut controller = session(DifficultyKey::Normal, 50, storage.clone());

    controller.handle_line("s");
    controller.handle_line("vm 0.1");
    drop(controller);

    let prefs = PreferenceStore::new(storage).load();
    assert!(!prefs.sfx_enabled);
    assert_eq!(prefs.music_volume, 0.1);
}

#[test]
fn test_status_shows_history() {
    let mut controller = session(DifficultyKey::Difficile, 55, MemoryStorage::new());
    controller.handle_line("10");
    controller.handle_line("90");

    let response = controller.handle_line("etat");
    assert!(response.lines.contains(&"Essai 1 : 10 est trop petit".to_string()));
    assert!(response.lines.contains(&"Essai 2 : 90 est trop grand".to_string()));
    assert!(response.lines.contains(&"Tentatives : 2 / 5".to_string()));
}

#[tokio::test]
async fn test_scripted_session_stops_on_quit() {
    let controller = session(DifficultyKey::Difficile, 55, MemoryStorage::new());
    let input = InputBridge::spawn(Cursor::new("10\n90\n50\n60\n55\nquitter\n42\n"));
    let mut out = Vec::new();

    controller.run(input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("🎯 Nombre Mystère"));
    assert!(text.contains("Bravo ! Vous avez trouvé en 5 coups."));
    assert!(text.ends_with("Au revoir !\n"));
    assert!(!text.contains("La partie est terminée"));
}
