// TerminalController - Main controller wiring terminal input to the game
//
// Each input line is parsed into a command and dispatched to the game
// controller, the audio manager, the FAQ or the contact form. Game events
// broadcast along the way are drained after every command and rendered.

use crate::models::{DifficultyKey, GamePhase};
use crate::services::{AudioManager, CONFIRMATION, ContactForm, FaqAccordion};
use crate::state::{GameController, GameEvent};
use crate::ui::bridge::InputBridge;
use crate::ui::render;
use anyhow::Result;
use std::io::Write;
use std::rc::Rc;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Word that abandons the contact form at any prompt
pub const CANCEL_WORD: &str = "annuler";

/// Output of one handled line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    /// The player asked to leave
    pub quit: bool,
}

impl Response {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command<'a> {
    Empty,
    Guess(&'a str),
    Difficulty(Option<&'a str>),
    Restart,
    ToggleMusic,
    ToggleSfx,
    MusicVolume(Option<&'a str>),
    SfxVolume(Option<&'a str>),
    Faq(Option<&'a str>),
    Contact,
    Status,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let word = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match word.as_str() {
            "d" | "difficulte" | "difficulté" => Command::Difficulty(arg),
            "r" | "recommencer" => Command::Restart,
            "m" | "musique" => Command::ToggleMusic,
            "s" | "effets" => Command::ToggleSfx,
            "vm" => Command::MusicVolume(arg),
            "ve" => Command::SfxVolume(arg),
            "faq" => Command::Faq(arg),
            "contact" => Command::Contact,
            "etat" | "état" => Command::Status,
            "aide" | "?" => Command::Help,
            "q" | "quitter" => Command::Quit,
            _ => Command::Guess(line),
        }
    }
}

/// Contact form being filled in, one field per line
#[derive(Debug, Clone, PartialEq, Eq)]
enum ContactDraft {
    Name,
    Email { name: String },
    Message { name: String, email: String },
}

/// Terminal front end for one game session.
///
/// Owns the [`GameController`] and shares the [`AudioManager`] with it. Every
/// line counts as a user interaction for the audio autoplay gate.
pub struct TerminalController {
    game: GameController,
    audio: Rc<AudioManager>,
    faq: FaqAccordion,
    events: broadcast::Receiver<GameEvent>,
    contact: Option<ContactDraft>,
}

impl TerminalController {
    /// Create a controller for `game`. `audio` should be the sound player
    /// the game controller was built with.
    pub fn new(game: GameController, audio: Rc<AudioManager>) -> Self {
        let events = game.subscribe();
        Self {
            game,
            audio,
            faq: FaqAccordion::default(),
            events,
            contact: None,
        }
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn faq(&self) -> &FaqAccordion {
        &self.faq
    }

    /// Whether the next line feeds the contact form
    pub fn is_filling_contact(&self) -> bool {
        self.contact.is_some()
    }

    /// Lines shown when the session starts
    pub fn welcome(&self) -> Vec<String> {
        let mut lines = vec!["🎯 Nombre Mystère".to_string()];
        lines.extend(render::game_view(&self.game.snapshot()));
        lines.push(render::audio_status(&self.audio.preferences()));
        lines.push("Tapez 'aide' pour la liste des commandes.".to_string());
        lines
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Response {
        self.audio.notify_user_interaction();

        if let Some(draft) = self.contact.take() {
            return Response::lines(self.on_contact_input(draft, line));
        }

        let mut response = match Command::parse(line) {
            Command::Empty => Response::default(),
            Command::Guess(input) => Response::lines(self.on_guess_submitted(input)),
            Command::Difficulty(name) => Response::lines(self.on_difficulty_changed(name)),
            Command::Restart => Response::lines(self.on_restart()),
            Command::ToggleMusic => {
                self.audio.toggle_music(None);
                Response::lines(vec![render::audio_status(&self.audio.preferences())])
            }
            Command::ToggleSfx => {
                self.audio.toggle_sfx(None);
                Response::lines(vec![render::audio_status(&self.audio.preferences())])
            }
            Command::MusicVolume(value) => {
                Response::lines(self.on_volume_changed(value, |audio, v| audio.set_music_volume(v)))
            }
            Command::SfxVolume(value) => {
                Response::lines(self.on_volume_changed(value, |audio, v| audio.set_sfx_volume(v)))
            }
            Command::Faq(index) => Response::lines(self.on_faq(index)),
            Command::Contact => {
                self.contact = Some(ContactDraft::Name);
                Response::lines(vec![
                    format!("Contact (tapez '{}' pour abandonner)", CANCEL_WORD),
                    "Nom :".to_string(),
                ])
            }
            Command::Status => {
                let mut lines = render::game_view(&self.game.snapshot());
                lines.push(render::audio_status(&self.audio.preferences()));
                Response::lines(lines)
            }
            Command::Help => Response::lines(render::help_lines()),
            Command::Quit => Response {
                lines: vec!["Au revoir !".to_string()],
                quit: true,
            },
        };

        // Event lines go first, command-specific lines follow
        let mut lines = self.drain_events();
        lines.append(&mut response.lines);
        response.lines = lines;
        response
    }

    fn on_guess_submitted(&mut self, input: &str) -> Vec<String> {
        match self.game.submit_raw(input) {
            Ok(result) if result.phase == GamePhase::Ready => {
                vec![render::attempts_line(&self.game.snapshot())]
            }
            // Terminal outcomes and rejections are reported through events
            Ok(_) | Err(_) => Vec::new(),
        }
    }

    fn on_difficulty_changed(&mut self, name: Option<&str>) -> Vec<String> {
        let Some(name) = name else {
            return render::difficulty_menu(self.game.difficulty());
        };

        match name.parse::<DifficultyKey>() {
            Ok(key) => {
                tracing::info!("Difficulty changed to {}", key);
                render::game_view(&self.game.new_game(key))
            }
            Err(e) => {
                let mut lines = vec![render::rejection_message(&e)];
                lines.extend(render::difficulty_menu(self.game.difficulty()));
                lines
            }
        }
    }

    fn on_restart(&mut self) -> Vec<String> {
        render::game_view(&self.game.restart())
    }

    fn on_volume_changed<F>(&self, value: Option<&str>, apply: F) -> Vec<String>
    where
        F: FnOnce(&AudioManager, f32) -> f32,
    {
        match value.map(|v| v.replace(',', ".").parse::<f32>()) {
            Some(Ok(volume)) => {
                apply(&self.audio, volume);
                vec![render::audio_status(&self.audio.preferences())]
            }
            Some(Err(_)) | None => {
                vec!["Volume invalide : entrez une valeur entre 0 et 1.".to_string()]
            }
        }
    }

    fn on_faq(&mut self, index: Option<&str>) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(index) = index {
            if index.eq_ignore_ascii_case("fermer") {
                self.faq.collapse_all();
                return render::faq_lines(&self.faq);
            }

            match index.parse::<usize>() {
                // Entries are numbered from 1 on screen
                Ok(n) if n > 0 => {
                    if let Err(e) = self.faq.toggle(n - 1) {
                        tracing::debug!("FAQ toggle refused: {}", e);
                        lines.push(format!("Pas de question n°{}.", n));
                    }
                }
                _ => lines.push(format!("Pas de question n°{}.", index)),
            }
        }

        lines.extend(render::faq_lines(&self.faq));
        lines
    }

    fn on_contact_input(&mut self, draft: ContactDraft, line: &str) -> Vec<String> {
        let value = line.trim().to_string();
        if value.eq_ignore_ascii_case(CANCEL_WORD) {
            tracing::debug!("Contact form abandoned");
            return vec!["Message abandonné.".to_string()];
        }

        match draft {
            ContactDraft::Name => {
                self.contact = Some(ContactDraft::Email { name: value });
                vec!["Email :".to_string()]
            }
            ContactDraft::Email { name } => {
                self.contact = Some(ContactDraft::Message { name, email: value });
                vec!["Message :".to_string()]
            }
            ContactDraft::Message { name, email } => {
                match ContactForm::new(name, email, value).validate() {
                    Ok(()) => vec![format!("✅ {}", CONFIRMATION)],
                    Err(errors) => {
                        let mut lines: Vec<String> =
                            errors.iter().map(|e| format!("❌ {}", e)).collect();
                        lines.push("Message non envoyé.".to_string());
                        lines
                    }
                }
            }
        }
    }

    /// Render every pending game event
    fn drain_events(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => lines.extend(render::render_event(&event)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Terminal lagged behind, {} game events skipped", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        lines
    }

    /// Run the session until the player quits, input ends or Ctrl+C.
    ///
    /// # Errors
    /// Only when writing to `out` fails
    pub async fn run<W: Write>(mut self, mut input: InputBridge, mut out: W) -> Result<()> {
        write_lines(&mut out, &self.welcome())?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = tokio::select! {
                line = input.recv() => line,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, leaving the game");
                    writeln!(out)?;
                    None
                }
            };

            let Some(line) = line else {
                tracing::info!("Input closed");
                break;
            };

            let response = self.handle_line(&line);
            write_lines(&mut out, &response.lines)?;
            if response.quit {
                break;
            }
        }

        self.game.metrics().log_summary();
        Ok(())
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{PreferenceStore, SilentBackend, SoundName};
    use crate::storage::MemoryStorage;
    use camino::Utf8Path;

    fn controller_with_secret(key: DifficultyKey, secret: i32) -> TerminalController {
        let store = PreferenceStore::new(MemoryStorage::new());
        let audio = Rc::new(AudioManager::new(
            store,
            &SilentBackend,
            Utf8Path::new("assets/audio"),
        ));
        let mut game = GameController::new(key, audio.clone());
        game.new_game_with_secret(key, secret).unwrap();
        TerminalController::new(game, audio)
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("42"), Command::Guess("42"));
        assert_eq!(Command::parse("D difficile"), Command::Difficulty(Some("difficile")));
        assert_eq!(Command::parse("d"), Command::Difficulty(None));
        assert_eq!(Command::parse("vm 0.8"), Command::MusicVolume(Some("0.8")));
        assert_eq!(Command::parse("faq 2"), Command::Faq(Some("2")));
        assert_eq!(Command::parse("quitter"), Command::Quit);
        assert_eq!(Command::parse("bonjour"), Command::Guess("bonjour"));
    }

    #[test]
    fn test_guess_feedback_and_attempts() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        let response = controller.handle_line("10");
        assert_eq!(response.lines, vec!["Trop petit !", "Tentatives : 1 / 10"]);

        let response = controller.handle_line("40");
        assert_eq!(response.lines, vec!["Bravo ! Vous avez trouvé en 2 coups."]);
    }

    #[test]
    fn test_invalid_guess_message() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        let response = controller.handle_line("abc");
        assert_eq!(response.lines, vec!["Veuillez entrer un nombre valide."]);
        assert_eq!(controller.game().snapshot().attempts, 0);
    }

    #[test]
    fn test_loss_reveals_secret() {
        let mut controller = controller_with_secret(DifficultyKey::Legendaire, 7);

        let response = controller.handle_line("42");
        assert_eq!(response.lines, vec!["Trop grand !", "Perdu ! Le nombre était 7."]);

        let response = controller.handle_line("7");
        assert!(response.lines[0].contains("recommencer"));
    }

    #[test]
    fn test_difficulty_change_starts_new_game() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);
        controller.handle_line("10");

        let response = controller.handle_line("d facile");
        assert!(response.lines[0].starts_with("Nouvelle partie"));
        let snapshot = controller.game().snapshot();
        assert_eq!(snapshot.difficulty, DifficultyKey::Facile);
        assert_eq!(snapshot.attempts, 0);

        let response = controller.handle_line("d impossible");
        assert_eq!(response.lines[0], "Difficulté inconnue : impossible");
        assert_eq!(controller.game().difficulty(), DifficultyKey::Facile);
    }

    #[test]
    fn test_first_line_unlocks_music() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);
        assert!(controller.audio().is_autoplay_armed());

        controller.handle_line("");
        assert!(!controller.audio().is_autoplay_armed());
        assert!(controller.audio().status(SoundName::Background).unwrap().playing);

        controller.handle_line("m");
        assert!(!controller.audio().preferences().music_enabled);
        assert!(!controller.audio().status(SoundName::Background).unwrap().playing);
    }

    #[test]
    fn test_volume_commands() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        controller.handle_line("vm 0,8");
        assert_eq!(controller.audio().preferences().music_volume, 0.8);

        controller.handle_line("ve 3");
        assert_eq!(controller.audio().preferences().sfx_volume, 1.0);

        let response = controller.handle_line("ve fort");
        assert!(response.lines[0].starts_with("Volume invalide"));
        assert_eq!(controller.audio().preferences().sfx_volume, 1.0);
    }

    #[test]
    fn test_faq_toggle() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        controller.handle_line("faq 2");
        assert_eq!(controller.faq().open_index(), Some(1));
        controller.handle_line("faq 2");
        assert_eq!(controller.faq().open_index(), None);

        controller.handle_line("faq 3");
        controller.handle_line("faq fermer");
        assert_eq!(controller.faq().open_index(), None);

        let response = controller.handle_line("faq 99");
        assert_eq!(response.lines[0], "Pas de question n°99.");
    }

    #[test]
    fn test_contact_flow() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        assert_eq!(controller.handle_line("contact").lines[1], "Nom :");
        assert!(controller.is_filling_contact());
        assert_eq!(controller.handle_line("Léa").lines, vec!["Email :"]);
        assert_eq!(controller.handle_line("lea@example.fr").lines, vec!["Message :"]);

        let response = controller.handle_line("Super jeu, merci beaucoup !");
        assert_eq!(response.lines, vec![format!("✅ {}", CONFIRMATION)]);
        assert!(!controller.is_filling_contact());
    }

    #[test]
    fn test_contact_errors_and_cancel() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);

        controller.handle_line("contact");
        controller.handle_line("L");
        controller.handle_line("pas-un-email");
        let response = controller.handle_line("court");
        assert_eq!(response.lines.len(), 4);
        assert_eq!(response.lines[3], "Message non envoyé.");

        controller.handle_line("contact");
        let response = controller.handle_line("ANNULER");
        assert_eq!(response.lines, vec!["Message abandonné."]);
        assert!(!controller.is_filling_contact());

        // Numbers typed during the form are not guesses
        controller.handle_line("contact");
        controller.handle_line("50");
        assert_eq!(controller.game().snapshot().attempts, 0);
    }

    #[test]
    fn test_quit() {
        let mut controller = controller_with_secret(DifficultyKey::Normal, 40);
        assert!(controller.handle_line("q").quit);
        assert!(!controller.handle_line("etat").quit);
    }

    #[tokio::test]
    async fn test_run_until_input_ends() {
        let controller = controller_with_secret(DifficultyKey::Normal, 40);
        let input = InputBridge::spawn(std::io::Cursor::new("10\n40\n"));
        let mut out = Vec::new();

        controller.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Trop petit !"));
        assert!(text.contains("Bravo ! Vous avez trouvé en 2 coups."));
    }
}
