//! GoogleTranslator - client for the public Google Translate web endpoint.

use reqwest::Client;
use s2d_core::config::TranslationConfig;
use s2d_core::translation::Translator;
use s2d_core::{Result, S2dError};
use serde_json::Value;

/// Longest input the endpoint accepts in one request.
pub const MAX_TRANSLATION_CHARS: usize = 5000;

#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// Overrides the endpoint after construction.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new(&TranslationConfig::default())
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` tuples, one per sentence.
fn extract_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(text);
        }
    }
    Some(translated)
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }
        if source == target {
            return Ok(text.to_string());
        }

        let length = text.chars().count();
        if length >= MAX_TRANSLATION_CHARS {
            return Err(S2dError::translation(format!(
                "Text of {length} characters exceeds the {MAX_TRANSLATION_CHARS} character limit"
            )));
        }

        tracing::debug!(source, target, length, "Translating text");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|err| S2dError::network(None, format!("Translation request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(S2dError::network(
                Some(status.as_u16()),
                format!("Translation service rejected the request: {body}"),
            ));
        }

        let body: Value = response.json().await.map_err(|err| {
            S2dError::translation(format!("Failed to parse translation response: {err}"))
        })?;

        extract_translation(&body)
            .ok_or_else(|| S2dError::translation("Translation response has an unexpected shape"))
    }
}
