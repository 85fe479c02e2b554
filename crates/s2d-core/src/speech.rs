//! Speech synthesis trait.

use std::io::Write;

use crate::error::Result;

/// MIME type of the audio produced by the synthesizer.
pub const AUDIO_MIME: &str = "audio/mp3";

/// Text-to-speech engine producing compressed audio.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` in `language` and writes the audio to `sink`.
    ///
    /// Audio may be written incrementally, so a failure can leave partial
    /// output behind; callers own cleanup of whatever `sink` points to.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<()>;
}
