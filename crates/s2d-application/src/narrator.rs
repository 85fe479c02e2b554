//! Audio narrator: synthesizes speech into a transient MP3 and reads it back.
//!
//! The transient file is a [`tempfile::NamedTempFile`], which unlinks itself
//! when dropped. Every exit path of [`AudioNarrator::narrate`], including a
//! synthesis error after partial output, therefore leaves no file behind.

use s2d_core::language::speech_language;
use s2d_core::speech::{AUDIO_MIME, SpeechSynthesizer};
use s2d_core::{Result, S2dError};
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Arc;

/// Narrated audio held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct NarratedAudio {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    /// The language actually used for synthesis, after clamping.
    pub language: &'static str,
}

#[derive(Clone)]
pub struct AudioNarrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    audio_dir: Option<PathBuf>,
}

impl AudioNarrator {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            audio_dir: None,
        }
    }

    /// Places transient files in `dir` instead of the system temp dir.
    pub fn with_audio_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.audio_dir = dir;
        self
    }

    fn create_transient_file(&self) -> Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("audio_").suffix(".mp3");

        let file = match &self.audio_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        file.map_err(|e| S2dError::speech(format!("Failed to create audio file: {e}")))
    }

    /// Speaks `text` in `language_code`, clamped to a supported speech language.
    pub async fn narrate(&self, text: &str, language_code: &str) -> Result<NarratedAudio> {
        let language = speech_language(language_code);
        let mut file = self.create_transient_file()?;
        tracing::debug!(path = %file.path().display(), language, "Narrating explanations");

        self.synthesizer
            .synthesize(text, language, file.as_file_mut())
            .await?;

        let mut bytes = Vec::new();
        let handle = file.as_file_mut();
        handle
            .seek(SeekFrom::Start(0))
            .and_then(|_| handle.read_to_end(&mut bytes))
            .map_err(|e| S2dError::speech(format!("Failed to read audio file: {e}")))?;

        Ok(NarratedAudio {
            bytes,
            mime: AUDIO_MIME,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FakeSynthesizer {
        languages: Mutex<Vec<String>>,
        fail_after_write: bool,
    }

    impl FakeSynthesizer {
        fn new(fail_after_write: bool) -> Self {
            Self {
                languages: Mutex::new(Vec::new()),
                fail_after_write,
            }
        }
    }

    #[async_trait::async_trait]
    impl SpeechSynthesizer for FakeSynthesizer {
        async fn synthesize(
            &self,
            text: &str,
            language: &str,
            sink: &mut (dyn Write + Send),
        ) -> Result<()> {
            self.languages.lock().unwrap().push(language.to_string());
            sink.write_all(b"ID3")?;
            if self.fail_after_write {
                return Err(S2dError::network(Some(500), "tts down"));
            }
            sink.write_all(text.as_bytes())?;
            Ok(())
        }
    }

    fn dir_entries(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_narrate_returns_bytes_and_removes_file() {
        let dir = TempDir::new().unwrap();
        let narrator = AudioNarrator::new(Arc::new(FakeSynthesizer::new(false)))
            .with_audio_dir(Some(dir.path().to_path_buf()));

        let audio = narrator.narrate("1. Acne: text\n", "fr").await.unwrap();

        assert_eq!(audio.bytes, b"ID31. Acne: text\n".to_vec());
        assert_eq!(audio.mime, "audio/mp3");
        assert_eq!(audio.language, "fr");
        assert_eq!(dir_entries(&dir), 0);
    }

    #[tokio::test]
    async fn test_unsupported_language_is_clamped_to_english() {
        let dir = TempDir::new().unwrap();
        let synthesizer = Arc::new(FakeSynthesizer::new(false));
        let narrator =
            AudioNarrator::new(synthesizer.clone()).with_audio_dir(Some(dir.path().to_path_buf()));

        let audio = narrator.narrate("text", "zz").await.unwrap();

        assert_eq!(audio.language, "en");
        assert_eq!(synthesizer.languages.lock().unwrap()[0], "en");
    }

    #[tokio::test]
    async fn test_file_removed_when_synthesis_fails_midway() {
        let dir = TempDir::new().unwrap();
        let narrator = AudioNarrator::new(Arc::new(FakeSynthesizer::new(true)))
            .with_audio_dir(Some(dir.path().to_path_buf()));

        let result = narrator.narrate("text", "en").await;

        assert!(result.is_err());
        assert_eq!(dir_entries(&dir), 0);
    }

    #[tokio::test]
    async fn test_missing_audio_dir_is_speech_error() {
        let dir = TempDir::new().unwrap();
        let narrator = AudioNarrator::new(Arc::new(FakeSynthesizer::new(false)))
            .with_audio_dir(Some(dir.path().join("missing")));

        let err = narrator.narrate("text", "en").await.unwrap_err();
        assert!(matches!(err, S2dError::Speech(_)));
    }
}
