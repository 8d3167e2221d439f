//! Terminal bell roll cue.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use dice_sim::sound::{NullSoundPlayer, SoundError, SoundPlayer};

/// Rings the terminal bell on the given writer.
pub struct BellSoundPlayer<W> {
    out: W,
}

impl<W: Write> BellSoundPlayer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPlayer for BellSoundPlayer<W> {
    fn play_roll(&mut self) -> Result<(), SoundError> {
        self.out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush())
            .map_err(|e| SoundError::Playback(e.to_string()))
    }
}

/// Pick the sound player for this session.
///
/// A configured asset that cannot be found degrades to silence, the same as
/// a device with no audio. With no asset configured the terminal bell is used.
pub fn open_sound_player(asset: Option<&Path>) -> Box<dyn SoundPlayer + Send> {
    match asset {
        Some(path) if !path.is_file() => {
            warn!(path = %path.display(), "roll sound asset not found, sound disabled");
            Box::new(NullSoundPlayer)
        }
        Some(path) => {
            info!(path = %path.display(), "roll sound asset found, using terminal bell");
            Box::new(BellSoundPlayer::new(std::io::stderr()))
        }
        None => Box::new(BellSoundPlayer::new(std::io::stderr())),
    }
}
