use crate::models::{AUDIO_PREFERENCES_KEY, AudioPreferences};
use crate::storage::{KeyValueStorage, StorageError};

/// Loads and saves [`AudioPreferences`] in a [`KeyValueStorage`].
///
/// Preferences are best-effort: [`load`](Self::load) never fails and
/// [`save`](Self::save) logs its failures, so callers are free to ignore the
/// returned `Result`.
pub struct PreferenceStore {
    storage: Box<dyn KeyValueStorage>,
}

impl PreferenceStore {
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Read the stored record.
    ///
    /// # Returns
    /// - `Ok(None)` when nothing was stored yet
    /// - `Ok(Some(prefs))` with volumes clamped to `[0, 1]`
    /// - `Err(_)` when the backend fails or the record does not parse
    pub fn try_load(&self) -> Result<Option<AudioPreferences>, StorageError> {
        let Some(raw) = self.storage.get_item(AUDIO_PREFERENCES_KEY)? else {
            return Ok(None);
        };

        let prefs: AudioPreferences = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(Some(prefs.clamped()))
    }

    /// Read the stored record, falling back to defaults on absence or error
    pub fn load(&self) -> AudioPreferences {
        match self.try_load() {
            Ok(Some(prefs)) => {
                tracing::info!(
                    "Loaded audio preferences: music={} ({:.2}), sfx={} ({:.2})",
                    prefs.music_enabled,
                    prefs.music_volume,
                    prefs.sfx_enabled,
                    prefs.sfx_volume
                );
                prefs
            }
            Ok(None) => {
                tracing::info!("No stored audio preferences, using defaults");
                AudioPreferences::default()
            }
            Err(e) => {
                tracing::warn!("Could not load audio preferences, using defaults: {}", e);
                AudioPreferences::default()
            }
        }
    }

    /// Persist the record. Failures are logged before being returned.
    pub fn save(&self, prefs: &AudioPreferences) -> Result<(), StorageError> {
        let result = serde_json::to_string(prefs)
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .and_then(|json| self.storage.set_item(AUDIO_PREFERENCES_KEY, &json));

        match &result {
            Ok(()) => tracing::debug!("Saved audio preferences"),
            Err(e) => tracing::warn!("Could not save audio preferences: {}", e),
        }

        result
    }
}
