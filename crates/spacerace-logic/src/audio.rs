//! Voice clips: file naming, loading through a decoder, playback queueing.
//!
//! Decoding and mixing live outside this crate; this module only keeps the
//! decoded voice buffer and hands it to an [`AudioQueue`].

use crate::constants::audio::{VOICE_CHANNELS, VOICE_RATE_HZ};
use crate::player::Player;

/// Stream properties reported by a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfo {
    pub channels: u32,
    pub rate: u32,
}

/// Source of decoded PCM for a named clip.
pub trait AudioDecoder {
    fn info(&mut self, name: &str) -> Result<AudioInfo, AudioError>;
    fn decode(&mut self, name: &str) -> Result<Vec<u8>, AudioError>;
}

/// Sink that plays buffers on the voice channel.
pub trait AudioQueue {
    fn play(&mut self, buffer: &[u8]);
    fn silence(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The clip could not be opened or has no audio stream.
    Unavailable(String),
    /// Voice clips must be mono 11025 Hz.
    UnsupportedFormat { name: String, info: AudioInfo },
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::Unavailable(name) => write!(f, "No audio data in file `{}'", name),
            AudioError::UnsupportedFormat { name, info } => write!(
                f,
                "File `{}' should be mono, 11025Hz (got {} channels, {}Hz)",
                name, info.channels, info.rate
            ),
        }
    }
}

impl std::error::Error for AudioError {}

/// `usa_003.ogg` / `sov_003.ogg`.
pub fn voice_file_name(player: Player, index: u8) -> String {
    format!("{}_{:03}.ogg", player.file_prefix(), index)
}

/// The currently loaded voice clip.
#[derive(Debug, Clone, Default)]
pub struct VoiceBuffer {
    data: Vec<u8>,
}

impl VoiceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replace the buffer with the decoded clip `name`.
    ///
    /// On failure the buffer is left empty so a later `play` is a no-op.
    pub fn load<D: AudioDecoder + ?Sized>(
        &mut self,
        decoder: &mut D,
        name: &str,
    ) -> Result<usize, AudioError> {
        self.data.clear();

        let info = decoder.info(name)?;
        if info.channels != VOICE_CHANNELS || info.rate != VOICE_RATE_HZ {
            log::error!("file `{}' should be mono, 11025Hz", name);
            return Err(AudioError::UnsupportedFormat {
                name: name.to_string(),
                info,
            });
        }

        self.data = decoder.decode(name)?;
        log::debug!("Loaded voice clip `{}' ({} bytes)", name, self.data.len());
        Ok(self.data.len())
    }

    /// Load the numbered voice clip for `player`.
    pub fn load_voice<D: AudioDecoder + ?Sized>(
        &mut self,
        decoder: &mut D,
        player: Player,
        index: u8,
    ) -> Result<usize, AudioError> {
        self.load(decoder, &voice_file_name(player, index))
    }

    /// Queue the loaded clip. Does nothing when nothing is loaded.
    pub fn play<Q: AudioQueue + ?Sized>(&self, queue: &mut Q) {
        if self.data.is_empty() {
            return;
        }
        queue.play(&self.data);
    }

    pub fn stop<Q: AudioQueue + ?Sized>(&self, queue: &mut Q) {
        queue.silence();
    }
}
