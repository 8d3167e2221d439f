//! Sound cue seam. Playback is fire-and-forget: the simulator logs failures
//! and carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("sound asset not loaded")]
    NotLoaded,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Plays the one-shot roll cue.
pub trait SoundPlayer {
    fn play_roll(&mut self) -> Result<(), SoundError>;
}

/// Plays nothing. Used when no audio backend is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play_roll(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play_roll(&mut self) -> Result<(), SoundError> {
        (**self).play_roll()
    }
}
