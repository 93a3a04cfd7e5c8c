// Text rendering for the terminal front end
//
// Pure functions turning snapshots, events and preferences into the French
// strings shown to the player.

use crate::models::{AudioPreferences, DifficultyKey, GameError, GamePhase, GameSnapshot, GuessOutcome};
use crate::services::FaqAccordion;
use crate::state::GameEvent;

/// Number of "67" shown when the easter egg fires
pub const EASTER_EGG_RAIN: usize = 67;

pub fn outcome_feedback(outcome: GuessOutcome) -> Option<&'static str> {
    match outcome {
        GuessOutcome::TooLow => Some("Trop petit !"),
        GuessOutcome::TooHigh => Some("Trop grand !"),
        GuessOutcome::Correct => None,
    }
}

fn history_verdict(outcome: GuessOutcome) -> &'static str {
    match outcome {
        GuessOutcome::TooLow => "est trop petit",
        GuessOutcome::TooHigh => "est trop grand",
        GuessOutcome::Correct => "est correct",
    }
}

/// Text for one game event, `None` for events with nothing to show
pub fn render_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::GameStarted { difficulty, .. } => Some(format!(
            "Nouvelle partie : {}. Devinez le nombre mystère !",
            difficulty.profile().label
        )),
        GameEvent::GuessEvaluated { outcome, .. } => outcome_feedback(*outcome).map(str::to_string),
        GameEvent::GuessRejected { reason } => Some(rejection_message(reason)),
        GameEvent::GameWon { attempts_used } => {
            Some(format!("Bravo ! Vous avez trouvé en {} coups.", attempts_used))
        }
        GameEvent::GameLost { secret } => Some(format!("Perdu ! Le nombre était {}.", secret)),
        GameEvent::EasterEgg => Some(easter_egg_banner()),
    }
}

pub fn rejection_message(error: &GameError) -> String {
    match error {
        GameError::GameOver => {
            "La partie est terminée. Tapez 'recommencer' pour rejouer.".to_string()
        }
        GameError::UnknownDifficulty(name) => format!("Difficulté inconnue : {}", name),
        _ => "Veuillez entrer un nombre valide.".to_string(),
    }
}

pub fn easter_egg_banner() -> String {
    format!("🎉 {}", vec!["67"; EASTER_EGG_RAIN].join(" "))
}

pub fn attempts_line(snapshot: &GameSnapshot) -> String {
    format!("Tentatives : {} / {}", snapshot.attempts, snapshot.max_attempts)
}

pub fn history_lines(snapshot: &GameSnapshot) -> Vec<String> {
    snapshot
        .history
        .iter()
        .enumerate()
        .map(|(i, record)| {
            format!(
                "Essai {} : {} {}",
                i + 1,
                record.value,
                history_verdict(record.outcome)
            )
        })
        .collect()
}

/// Full view of the current game
pub fn game_view(snapshot: &GameSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("Difficulté : {}", snapshot.difficulty.profile().label),
        format!("Votre proposition ({}-{}) :", snapshot.min, snapshot.max),
        attempts_line(snapshot),
    ];
    lines.extend(history_lines(snapshot));

    match (snapshot.phase, snapshot.secret) {
        (GamePhase::Won, _) => lines.push("Partie gagnée.".to_string()),
        (GamePhase::Lost, Some(secret)) => {
            lines.push(format!("Partie perdue, le nombre était {}.", secret))
        }
        _ => {}
    }
    lines
}

pub fn difficulty_menu(current: DifficultyKey) -> Vec<String> {
    DifficultyKey::ALL
        .into_iter()
        .map(|key| {
            let marker = if key == current { ">" } else { " " };
            format!("{} {:<10} {}", marker, key.as_str(), key.profile().label)
        })
        .collect()
}

pub fn audio_status(prefs: &AudioPreferences) -> String {
    format!(
        "🎵 Musique : {} ({:.0}%) | 🔊 Effets : {} ({:.0}%)",
        if prefs.music_enabled { "activée" } else { "désactivée" },
        prefs.music_volume * 100.0,
        if prefs.sfx_enabled { "activés" } else { "désactivés" },
        prefs.sfx_volume * 100.0
    )
}

pub fn faq_lines(faq: &FaqAccordion) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in faq.entries().iter().enumerate() {
        let marker = if faq.is_expanded(i) { "▼" } else { "▶" };
        lines.push(format!("{} {}. {}", marker, i + 1, entry.question));
        if faq.is_expanded(i) {
            lines.push(format!("    {}", entry.answer));
        }
    }
    lines
}

pub fn help_lines() -> Vec<String> {
    [
        "Commandes :",
        "  <nombre>             proposer un nombre",
        "  d, difficulte <nom>  changer de difficulté (facile, normal, difficile, legendaire)",
        "  r, recommencer       nouvelle partie",
        "  m                    activer/désactiver la musique",
        "  s                    activer/désactiver les effets",
        "  vm <0-1>             volume de la musique",
        "  ve <0-1>             volume des effets",
        "  faq [n|fermer]       afficher la FAQ, ouvrir/fermer la question n",
        "  contact              écrire un message",
        "  etat                 afficher la partie en cours",
        "  aide                 cette aide",
        "  q, quitter           quitter",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
