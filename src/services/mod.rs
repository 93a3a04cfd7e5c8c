//! Services module - audio, preferences, and the peripheral site features.
//!
//! These services have no dependency on the terminal front end, which keeps
//! them testable in isolation.
//!
//! # Components
//!
//! - [`PreferenceStore`]: loads and saves [`AudioPreferences`](crate::models::AudioPreferences)
//!   in a [`KeyValueStorage`](crate::storage::KeyValueStorage). Never fails the caller.
//!
//! - [`AudioManager`]: owns the background loop and the three sound effects, applies
//!   preferences, gates music behind the first user interaction. Implements
//!   [`SoundPlayer`], the trait the game controller sends its cues through.
//!
//! - [`AudioBackend`] / [`AudioHandle`]: the seam to the actual audio output.
//!   [`SilentBackend`] tracks state without a device; `RodioBackend` (feature
//!   `playback`) plays through the default output device.
//!
//! - [`FaqAccordion`]: FAQ entries, one expanded at a time.
//!
//! - [`ContactForm`]: contact form validation rules.
//!
//! # Error policy
//!
//! Storage and playback failures are logged with `tracing` and swallowed. A
//! broken sound card or a full disk never interrupts a game.

pub mod audio;
pub mod contact;
pub mod faq;
#[cfg(feature = "playback")]
pub mod playback;
pub mod preferences;

pub use audio::{
    AudioBackend, AudioError, AudioHandle, AudioManager, AudioResource, NoopSoundPlayer,
    PlaybackStatus, SilentBackend, SoundName, SoundPlayer,
};
pub use contact::{CONFIRMATION, ContactFieldError, ContactForm};
pub use faq::{FaqAccordion, FaqEntry, FaqError};
#[cfg(feature = "playback")]
pub use playback::RodioBackend;
pub use preferences::PreferenceStore;
