//! GoogleSpeech - MP3 synthesis through the Google Translate TTS endpoint.
//!
//! The endpoint only accepts short inputs, so longer text is split into
//! chunks and the audio of each chunk is appended to the same sink.

use reqwest::Client;
use s2d_core::config::SpeechConfig;
use s2d_core::speech::SpeechSynthesizer;
use s2d_core::{Result, S2dError};
use std::io::Write;

/// Maximum characters per TTS request.
pub const MAX_CHUNK_CHARS: usize = 100;

const SENTENCE_PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '¿', '¡', '،', '؟', '۔', '。', '，', '、', '…',
];

#[derive(Clone)]
pub struct GoogleSpeech {
    client: Client,
    endpoint: String,
}

impl GoogleSpeech {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>> {
        let total_str = total.to_string();
        let index_str = index.to_string();
        let length_str = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("total", total_str.as_str()),
                ("idx", index_str.as_str()),
                ("textlen", length_str.as_str()),
            ])
            .send()
            .await
            .map_err(|err| S2dError::network(None, format!("Speech request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(S2dError::network(
                Some(status.as_u16()),
                format!("Speech service rejected chunk {} of {total}", index + 1),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| S2dError::network(None, format!("Failed to read audio: {err}")))?;
        Ok(bytes.to_vec())
    }
}

impl Default for GoogleSpeech {
    fn default() -> Self {
        Self::new(&SpeechConfig::default())
    }
}

/// Splits `text` at `separators`, keeping each separator with the piece
/// before it.
fn split_keeping<'a>(text: &'a str, is_separator: impl Fn(char) -> bool) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if is_separator(c) {
            let end = i + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Cuts `piece` into slices of at most `max` characters.
fn hard_split(piece: &str, max: usize) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (i, _) in piece.char_indices() {
        if count == max {
            out.push(&piece[start..i]);
            start = i;
            count = 0;
        }
        count += 1;
    }
    if start < piece.len() {
        out.push(&piece[start..]);
    }
    out
}

/// Splits text into chunks of at most `max` characters.
///
/// Sentence punctuation is preferred as a boundary, then whitespace, then
/// a hard cut. Adjacent small pieces are merged greedily. Chunks are trimmed
/// and empty chunks dropped.
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let mut pieces: Vec<&str> = Vec::new();
    for sentence in split_keeping(text, |c| SENTENCE_PUNCTUATION.contains(&c)) {
        if sentence.chars().count() <= max {
            pieces.push(sentence);
            continue;
        }
        for word in split_keeping(sentence, char::is_whitespace) {
            if word.chars().count() <= max {
                pieces.push(word);
            } else {
                pieces.extend(hard_split(word, max));
            }
        }
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for piece in pieces {
        if current.chars().count() + piece.chars().count() > max {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
            current.clear();
        }
        current.push_str(piece);
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }

    chunks
}

#[async_trait::async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<()> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(S2dError::speech("No text to speak"));
        }

        tracing::debug!(language, chunks = chunks.len(), "Synthesizing speech");

        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.fetch_chunk(chunk, language, index, total).await?;
            sink.write_all(&audio)
                .map_err(|e| S2dError::speech(format!("Failed to write audio: {e}")))?;
        }
        sink.flush()
            .map_err(|e| S2dError::speech(format!("Failed to write audio: {e}")))?;

        Ok(())
    }
}
