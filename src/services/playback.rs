//! Real audio output through `rodio` (enabled by the `playback` feature).

use camino::Utf8PathBuf;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;

use super::audio::{AudioBackend, AudioError, AudioHandle, AudioResource, PlaybackStatus};

/// Backend playing through the default output device.
///
/// The output stream stops when this value is dropped, so it must outlive
/// every handle it opened.
pub struct RodioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioBackend {
    /// Open the default output device
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::PlaybackBlocked(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, resource: &AudioResource) -> Result<Box<dyn AudioHandle>, AudioError> {
        if !resource.source.exists() {
            return Err(AudioError::Unavailable(resource.source.to_string()));
        }

        let sink = new_sink(&self.stream_handle)?;
        sink.set_volume(resource.volume);

        Ok(Box::new(RodioHandle {
            stream_handle: self.stream_handle.clone(),
            sink,
            source: resource.source.clone(),
            looping: resource.looping,
            volume: resource.volume,
            play_count: 0,
        }))
    }
}

fn new_sink(stream_handle: &OutputStreamHandle) -> Result<Sink, AudioError> {
    let sink = Sink::try_new(stream_handle).map_err(|e| AudioError::PlaybackBlocked(e.to_string()))?;
    sink.pause();
    Ok(sink)
}

struct RodioHandle {
    stream_handle: OutputStreamHandle,
    sink: Sink,
    source: Utf8PathBuf,
    looping: bool,
    volume: f32,
    play_count: u32,
}

impl RodioHandle {
    fn enqueue_source(&self) -> Result<(), AudioError> {
        let file = File::open(&self.source)
            .map_err(|e| AudioError::Unavailable(format!("{}: {}", self.source, e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::Decode(format!("{}: {}", self.source, e)))?;

        if self.looping {
            self.sink.append(decoder.repeat_infinite());
        } else {
            self.sink.append(decoder);
        }
        Ok(())
    }
}

impl AudioHandle for RodioHandle {
    fn play(&mut self) -> Result<(), AudioError> {
        if self.sink.empty() {
            self.enqueue_source()?;
        }
        self.sink.play();
        self.play_count += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn rewind(&mut self) {
        // Dropping the old sink stops whatever it was playing
        match new_sink(&self.stream_handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                self.sink = sink;
            }
            Err(e) => tracing::warn!("Could not rewind {}: {}", self.source, e),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.sink.set_volume(volume);
    }

    fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            playing: !self.sink.is_paused() && !self.sink.empty(),
            volume: self.volume,
            looping: self.looping,
            play_count: self.play_count,
        }
    }
}
