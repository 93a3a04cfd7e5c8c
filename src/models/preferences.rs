use serde::{Deserialize, Serialize};

/// Storage key holding the serialized [`AudioPreferences`].
pub const AUDIO_PREFERENCES_KEY: &str = "audioPreferences";

/// User audio settings, persisted after every change.
///
/// Stored as a JSON object with camelCase fields. Fields missing from the
/// stored record keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioPreferences {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioPreferences {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            music_volume: 0.3,
            sfx_volume: 0.5,
        }
    }
}

impl AudioPreferences {
    /// Bring both volumes back into `[0, 1]`
    pub fn clamped(self) -> Self {
        Self {
            music_volume: clamp_volume(self.music_volume),
            sfx_volume: clamp_volume(self.sfx_volume),
            ..self
        }
    }
}

/// Clamp a volume to `[0, 1]`. NaN maps to silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = AudioPreferences::default();
        assert!(prefs.music_enabled);
        assert!(prefs.sfx_enabled);
        assert_eq!(prefs.music_volume, 0.3);
        assert_eq!(prefs.sfx_volume, 0.5);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&AudioPreferences::default()).unwrap();
        assert!(json.contains("\"musicEnabled\":true"));
        assert!(json.contains("\"sfxVolume\":0.5"));
    }

    #[test]
    fn test_partial_record_merges_over_defaults() {
        let prefs: AudioPreferences = serde_json::from_str(r#"{"musicEnabled":false}"#).unwrap();
        assert!(!prefs.music_enabled);
        assert!(prefs.sfx_enabled);
        assert_eq!(prefs.music_volume, 0.3);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(1.5), 1.0);
        assert_eq!(clamp_volume(-1.0), 0.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(f32::NAN), 0.0);

        let prefs = AudioPreferences {
            music_volume: 4.0,
            sfx_volume: -0.5,
            ..AudioPreferences::default()
        }
        .clamped();
        assert_eq!(prefs.music_volume, 1.0);
        assert_eq!(prefs.sfx_volume, 0.0);
    }
}
