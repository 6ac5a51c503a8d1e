//! Text-to-speech seam used for listening transcripts.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("audio playback is not supported on this device")]
    Unsupported,
    #[error("audio playback failed: {0}")]
    Failed(String),
}

/// Receives recognized text from a speech engine.
pub type SpeechResultCallback = Box<dyn FnMut(String) + Send>;

/// Platform speech engine: synthesis for playback, recognition for results.
pub trait SpeechCapability: Send + Sync {
    /// Start reading `text` aloud.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Unsupported` when the platform has no engine.
    fn play(&self, text: &str) -> Result<(), SpeechError>;

    fn stop(&self);

    /// Register a recognition callback.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Unsupported` when recognition is unavailable.
    fn on_result(&self, callback: SpeechResultCallback) -> Result<(), SpeechError>;

    /// Whether playback is still in progress.
    fn is_active(&self) -> bool;
}

/// Capability for platforms without a speech engine. Every request reports
/// `SpeechError::Unsupported`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeech;

impl SpeechCapability for UnsupportedSpeech {
    fn play(&self, _text: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn stop(&self) {}

    fn on_result(&self, _callback: SpeechResultCallback) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn is_active(&self) -> bool {
        false
    }
}

/// Playback state of the current listening unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioStatus {
    #[default]
    Idle,
    Playing,
    /// Played at least once; offered as a replay.
    Played,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_reports_every_call() {
        let speech = UnsupportedSpeech;
        assert_eq!(speech.play("hello"), Err(SpeechError::Unsupported));
        assert_eq!(
            speech.on_result(Box::new(|_| {})),
            Err(SpeechError::Unsupported)
        );
        speech.stop();
        assert!(!speech.is_active());
    }
}
