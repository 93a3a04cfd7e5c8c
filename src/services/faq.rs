use thiserror::Error;

/// One question of the FAQ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaqError {
    #[error("No FAQ entry #{index} (there are {len})")]
    NoSuchEntry { index: usize, len: usize },
}

/// Accordion over the FAQ entries: at most one answer is expanded at a time.
#[derive(Debug, Clone)]
pub struct FaqAccordion {
    entries: Vec<FaqEntry>,
    open: Option<usize>,
}

impl FaqAccordion {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries,
            open: None,
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Index of the expanded entry, if any
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Expand `index`, collapsing every other entry; collapse it if it was
    /// already expanded.
    ///
    /// # Returns
    /// The index that is expanded afterwards
    pub fn toggle(&mut self, index: usize) -> Result<Option<usize>, FaqError> {
        if index >= self.entries.len() {
            return Err(FaqError::NoSuchEntry {
                index,
                len: self.entries.len(),
            });
        }

        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.open)
    }

    pub fn collapse_all(&mut self) {
        self.open = None;
    }
}

impl Default for FaqAccordion {
    fn default() -> Self {
        Self::new(default_entries())
    }
}

/// The questions shown on the site
pub fn default_entries() -> Vec<FaqEntry> {
    [
        (
            "Comment jouer au jeu du nombre mystère ?",
            "Entrez un nombre entre 0 et 100, validez, et suivez les indices pour trouver le nombre secret.",
        ),
        (
            "Comment recommencer une partie ?",
            "Tapez 'recommencer' pour lancer une nouvelle partie sans relancer le jeu.",
        ),
        (
            "Le jeu est-il accessible sur mobile ?",
            "Oui, l’interface est responsive et adaptée à tous les écrans.",
        ),
        (
            "Puis-je jouer sans connexion Internet ?",
            "Oui, le jeu et ses sons fonctionnent entièrement en local.",
        ),
        (
            "Y a-t-il une limite de temps pour trouver le nombre ?",
            "Non, vous pouvez prendre tout le temps nécessaire pour deviner le nombre mystère.",
        ),
        (
            "Que signifient les différents niveaux de difficulté ?",
            "Les niveaux modifient la plage de nombres à deviner et le nombre de tentatives autorisées.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}
