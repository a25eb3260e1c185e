use std::io::Write;
use std::path::{Path, PathBuf};

use tip_core::{AudioError, AudioPlayer};
use tracing::debug;

/// Plays the reset sound as a terminal bell.
///
/// The configured asset must exist; a missing file is reported as
/// [`AudioError::MissingAsset`] and the coordinator logs it.
#[derive(Debug, Clone)]
pub struct BellAudioService {
    sound_path: PathBuf,
}

impl BellAudioService {
    pub fn new(sound_path: impl Into<PathBuf>) -> Self {
        Self {
            sound_path: sound_path.into(),
        }
    }

    pub fn sound_path(&self) -> &Path {
        &self.sound_path
    }
}

impl AudioPlayer for BellAudioService {
    fn play_sound(&self) -> Result<(), AudioError> {
        if !self.sound_path.is_file() {
            return Err(AudioError::MissingAsset(self.sound_path.clone()));
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        debug!(path = %self.sound_path.display(), "reset sound played");
        Ok(())
    }
}
