use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::game_state::GameError;

/// Guess range and attempt budget for one difficulty level.
///
/// Profiles are fixed at compile time; `min <= max` and `max_attempts >= 1`
/// hold for every entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyProfile {
    pub min: i32,
    pub max: i32,
    pub max_attempts: u32,
    pub label: &'static str,
}

impl DifficultyProfile {
    /// Whether `value` lies in the closed range `[min, max]`
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Number of distinct values a secret can take
    pub fn span(&self) -> u32 {
        self.max.abs_diff(self.min) + 1
    }
}

/// Closed set of difficulty names.
///
/// Serialized with the lowercase French names used in the settings file
/// and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyKey {
    Facile,
    #[default]
    Normal,
    Difficile,
    #[serde(alias = "légendaire")]
    Legendaire,
}

const FACILE: DifficultyProfile = DifficultyProfile {
    min: 0,
    max: 50,
    max_attempts: 20,
    label: "Facile (0-50, 20 coups)",
};

const NORMAL: DifficultyProfile = DifficultyProfile {
    min: 0,
    max: 100,
    max_attempts: 10,
    label: "Normal (0-100, 10 coups)",
};

const DIFFICILE: DifficultyProfile = DifficultyProfile {
    min: 0,
    max: 100,
    max_attempts: 5,
    label: "Difficile (0-100, 5 coups)",
};

const LEGENDAIRE: DifficultyProfile = DifficultyProfile {
    min: 0,
    max: 100,
    max_attempts: 1,
    label: "Légendaire (0-100, 1 coup)",
};

impl DifficultyKey {
    /// Every difficulty, in the order they are offered to the player
    pub const ALL: [DifficultyKey; 4] = [
        DifficultyKey::Facile,
        DifficultyKey::Normal,
        DifficultyKey::Difficile,
        DifficultyKey::Legendaire,
    ];

    /// Look up the profile for this difficulty
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            DifficultyKey::Facile => FACILE,
            DifficultyKey::Normal => NORMAL,
            DifficultyKey::Difficile => DIFFICILE,
            DifficultyKey::Legendaire => LEGENDAIRE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyKey::Facile => "facile",
            DifficultyKey::Normal => "normal",
            DifficultyKey::Difficile => "difficile",
            DifficultyKey::Legendaire => "legendaire",
        }
    }
}

impl fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "facile" => Ok(DifficultyKey::Facile),
            "normal" => Ok(DifficultyKey::Normal),
            "difficile" => Ok(DifficultyKey::Difficile),
            "legendaire" | "légendaire" => Ok(DifficultyKey::Legendaire),
            _ => Err(GameError::UnknownDifficulty(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_invariants() {
        for key in DifficultyKey::ALL {
            let profile = key.profile();
            assert!(profile.min <= profile.max, "{key}: min > max");
            assert!(profile.max_attempts >= 1, "{key}: no attempts");
        }
    }

    #[test]
    fn test_registry_values() {
        assert_eq!(DifficultyKey::Facile.profile().max, 50);
        assert_eq!(DifficultyKey::Facile.profile().max_attempts, 20);
        assert_eq!(DifficultyKey::Normal.profile().max_attempts, 10);
        assert_eq!(DifficultyKey::Difficile.profile().max_attempts, 5);
        assert_eq!(DifficultyKey::Legendaire.profile().max_attempts, 1);
        assert_eq!(DifficultyKey::default(), DifficultyKey::Normal);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("facile".parse::<DifficultyKey>().unwrap(), DifficultyKey::Facile);
        assert_eq!(" Difficile ".parse::<DifficultyKey>().unwrap(), DifficultyKey::Difficile);
        assert_eq!("Légendaire".parse::<DifficultyKey>().unwrap(), DifficultyKey::Legendaire);
        assert!(matches!(
            "impossible".parse::<DifficultyKey>(),
            Err(GameError::UnknownDifficulty(name)) if name == "impossible"
        ));
    }

    #[test]
    fn test_profile_contains_and_span() {
        let profile = DifficultyKey::Facile.profile();
        assert!(profile.contains(0));
        assert!(profile.contains(50));
        assert!(!profile.contains(51));
        assert!(!profile.contains(-1));
        assert_eq!(profile.span(), 51);
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml_ng::to_string(&DifficultyKey::Legendaire).unwrap();
        assert_eq!(yaml.trim(), "legendaire");
        let key: DifficultyKey = serde_yaml_ng::from_str("légendaire").unwrap();
        assert_eq!(key, DifficultyKey::Legendaire);
    }
}
