use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

use crate::models::{AudioPreferences, clamp_volume};
use crate::services::preferences::PreferenceStore;

/// The four sounds the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundName {
    Background,
    Correct,
    Wrong,
    EasterEgg67,
}

impl SoundName {
    pub const ALL: [SoundName; 4] = [
        SoundName::Background,
        SoundName::Correct,
        SoundName::Wrong,
        SoundName::EasterEgg67,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundName::Background => "background",
            SoundName::Correct => "correct",
            SoundName::Wrong => "wrong",
            SoundName::EasterEgg67 => "easterEgg67",
        }
    }

    /// Resolve a cue name, `None` for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sound| sound.as_str() == name)
    }

    /// File name inside the audio directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundName::Background => "background-music.mp3",
            SoundName::Correct => "correct.mp3",
            SoundName::Wrong => "wrong.mp3",
            SoundName::EasterEgg67 => "easter-egg-67.mp3",
        }
    }

    /// Only the background music loops
    pub fn is_background(self) -> bool {
        self == SoundName::Background
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one playable resource, handed to an [`AudioBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioResource {
    pub name: SoundName,
    pub source: Utf8PathBuf,
    pub looping: bool,
    pub volume: f32,
}

impl AudioResource {
    /// Resource for `name` in `audio_dir`, with the volume taken from `prefs`
    pub fn new(name: SoundName, audio_dir: &Utf8Path, prefs: &AudioPreferences) -> Self {
        let volume = if name.is_background() {
            prefs.music_volume
        } else {
            prefs.sfx_volume
        };

        Self {
            name,
            source: audio_dir.join(name.file_name()),
            looping: name.is_background(),
            volume,
        }
    }
}

/// Observable state of a loaded resource
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackStatus {
    pub playing: bool,
    pub volume: f32,
    pub looping: bool,
    /// How many times playback was started
    pub play_count: u32,
}

/// Errors raised by audio backends
#[derive(Error, Debug)]
pub enum AudioError {
    /// Playback refused by the platform, e.g. no output device
    #[error("Playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("Audio resource unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),
}

/// Playable handle for one loaded resource
#[cfg_attr(test, mockall::automock)]
pub trait AudioHandle {
    /// Start or resume playback from the current position
    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self);

    /// Move the playback position back to zero
    fn rewind(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn status(&self) -> PlaybackStatus;
}

/// Opens [`AudioResource`]s into playable handles
pub trait AudioBackend {
    fn open(&self, resource: &AudioResource) -> Result<Box<dyn AudioHandle>, AudioError>;
}

impl<F> AudioBackend for F
where
    F: Fn(&AudioResource) -> Result<Box<dyn AudioHandle>, AudioError>,
{
    fn open(&self, resource: &AudioResource) -> Result<Box<dyn AudioHandle>, AudioError> {
        self(resource)
    }
}

/// Receiver of fire-and-forget sound cues.
///
/// The game controller only depends on this trait, so tests can swap the
/// audio manager for [`NoopSoundPlayer`] or a recorder.
pub trait SoundPlayer {
    fn play_sound(&self, name: &str);
}

/// Sound player that ignores every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSoundPlayer;

impl SoundPlayer for NoopSoundPlayer {
    fn play_sound(&self, _name: &str) {}
}

/// Backend that plays nothing and only tracks handle state.
///
/// Used when the crate is built without the `playback` feature or when no
/// output device is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn open(&self, resource: &AudioResource) -> Result<Box<dyn AudioHandle>, AudioError> {
        tracing::debug!("Silent backend opened {} ({})", resource.name, resource.source);
        Ok(Box::new(SilentHandle {
            status: PlaybackStatus {
                playing: false,
                volume: resource.volume,
                looping: resource.looping,
                play_count: 0,
            },
        }))
    }
}

struct SilentHandle {
    status: PlaybackStatus,
}

impl AudioHandle for SilentHandle {
    fn play(&mut self) -> Result<(), AudioError> {
        self.status.playing = true;
        self.status.play_count += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.status.playing = false;
    }

    fn rewind(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.status.volume = volume;
    }

    fn status(&self) -> PlaybackStatus {
        self.status
    }
}

struct AudioInner {
    preferences: AudioPreferences,
    resources: IndexMap<SoundName, Box<dyn AudioHandle>>,
    /// Still waiting for the first user interaction
    autoplay_armed: bool,
    background_started: bool,
}

impl AudioInner {
    fn start_background(&mut self) {
        if !self.preferences.music_enabled {
            return;
        }

        let Some(background) = self.resources.get_mut(&SoundName::Background) else {
            tracing::warn!("Background music is not loaded");
            return;
        };

        match background.play() {
            Ok(()) => {
                self.background_started = true;
                tracing::info!("Background music started");
            }
            Err(e) => tracing::warn!("Unable to start background music: {}", e),
        }
    }
}

/// Owns the game's sounds and applies the user's audio preferences.
///
/// Every preference change is persisted through the [`PreferenceStore`]
/// immediately. Playback problems are logged and swallowed; nothing here
/// returns an error to the caller.
///
/// Background music is gated behind the first user interaction
/// ([`notify_user_interaction`](Self::notify_user_interaction)), after which
/// the gate stays open for the rest of the session.
///
/// Methods take `&self` so one manager can be shared (via `Rc`) between the
/// game controller and the front end on the event-loop thread.
pub struct AudioManager {
    store: PreferenceStore,
    inner: RefCell<AudioInner>,
}

impl AudioManager {
    /// Load preferences and open every resource from `audio_dir`.
    ///
    /// Resources the backend cannot open are logged and left unloaded.
    pub fn new(store: PreferenceStore, backend: &dyn AudioBackend, audio_dir: &Utf8Path) -> Self {
        let preferences = store.load();
        let mut resources = IndexMap::new();

        for name in SoundName::ALL {
            let resource = AudioResource::new(name, audio_dir, &preferences);
            match backend.open(&resource) {
                Ok(mut handle) => {
                    handle.set_volume(resource.volume);
                    resources.insert(name, handle);
                }
                Err(e) => tracing::warn!("Could not load sound {}: {}", name, e),
            }
        }

        tracing::info!(
            "Audio manager ready: {}/{} sounds loaded",
            resources.len(),
            SoundName::ALL.len()
        );

        Self {
            store,
            inner: RefCell::new(AudioInner {
                preferences,
                resources,
                autoplay_armed: true,
                background_started: false,
            }),
        }
    }

    pub fn preferences(&self) -> AudioPreferences {
        self.inner.borrow().preferences
    }

    /// Playback status of a loaded sound
    pub fn status(&self, name: SoundName) -> Option<PlaybackStatus> {
        self.inner
            .borrow()
            .resources
            .get(&name)
            .map(|handle| handle.status())
    }

    pub fn is_loaded(&self, name: SoundName) -> bool {
        self.inner.borrow().resources.contains_key(&name)
    }

    /// Whether background music is still waiting for a user interaction
    pub fn is_autoplay_armed(&self) -> bool {
        self.inner.borrow().autoplay_armed
    }

    /// Record a user interaction.
    ///
    /// The first call disarms the autoplay gate and starts the background
    /// loop if music is enabled. Later calls do nothing.
    pub fn notify_user_interaction(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.autoplay_armed {
            return;
        }

        inner.autoplay_armed = false;
        tracing::debug!("First user interaction, autoplay unlocked");

        if !inner.background_started {
            inner.start_background();
        }
    }

    /// Play a sound effect from the start.
    ///
    /// No-op when sound effects are disabled or the sound is not loaded.
    pub fn play(&self, sound: SoundName) {
        let mut inner = self.inner.borrow_mut();
        if !inner.preferences.sfx_enabled {
            tracing::debug!("Sound effects disabled, skipping {}", sound);
            return;
        }

        let Some(handle) = inner.resources.get_mut(&sound) else {
            tracing::warn!("Sound {} is not loaded", sound);
            return;
        };

        handle.rewind();
        if let Err(e) = handle.play() {
            tracing::warn!("Unable to play sound {}: {}", sound, e);
        }
    }

    /// Enable or disable music; `None` flips the current value.
    ///
    /// # Returns
    /// The new music setting
    pub fn toggle_music(&self, enabled: Option<bool>) -> bool {
        let mut inner = self.inner.borrow_mut();
        let enabled = enabled.unwrap_or(!inner.preferences.music_enabled);
        inner.preferences.music_enabled = enabled;
        let _ = self.store.save(&inner.preferences);

        if enabled {
            if !inner.autoplay_armed {
                inner.start_background();
            }
        } else if let Some(background) = inner.resources.get_mut(&SoundName::Background) {
            background.pause();
        }

        tracing::info!("Music {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    /// Enable or disable sound effects; `None` flips the current value.
    ///
    /// # Returns
    /// The new sound-effects setting
    pub fn toggle_sfx(&self, enabled: Option<bool>) -> bool {
        let mut inner = self.inner.borrow_mut();
        let enabled = enabled.unwrap_or(!inner.preferences.sfx_enabled);
        inner.preferences.sfx_enabled = enabled;
        let _ = self.store.save(&inner.preferences);

        tracing::info!("Sound effects {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    /// Set the background music volume, clamped to `[0, 1]`
    pub fn set_music_volume(&self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        let mut inner = self.inner.borrow_mut();
        inner.preferences.music_volume = volume;
        let _ = self.store.save(&inner.preferences);

        if let Some(background) = inner.resources.get_mut(&SoundName::Background) {
            background.set_volume(volume);
        }
        volume
    }

    /// Set the volume of every sound effect, clamped to `[0, 1]`
    pub fn set_sfx_volume(&self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        let mut inner = self.inner.borrow_mut();
        inner.preferences.sfx_volume = volume;
        let _ = self.store.save(&inner.preferences);

        for (_, handle) in inner
            .resources
            .iter_mut()
            .filter(|(name, _)| !name.is_background())
        {
            handle.set_volume(volume);
        }
        volume
    }
}

impl SoundPlayer for AudioManager {
    fn play_sound(&self, name: &str) {
        if !self.inner.borrow().preferences.sfx_enabled {
            return;
        }

        match SoundName::from_name(name) {
            Some(sound) => self.play(sound),
            None => tracing::warn!("Unknown sound \"{}\"", name),
        }
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for std::rc::Rc<P> {
    fn play_sound(&self, name: &str) {
        (**self).play_sound(name)
    }
}
