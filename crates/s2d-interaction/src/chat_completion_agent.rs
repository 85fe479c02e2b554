//! ChatCompletionAgent - OpenAI-compatible chat completion client used for
//! disease explanations.
//!
//! The default endpoint is Groq's OpenAI-compatible API; any server speaking
//! the same `/chat/completions` protocol works.

use minijinja::{Environment, context};
use reqwest::{Client, StatusCode};
use s2d_core::config::{ExplanationConfig, SecretConfig};
use s2d_core::explanation::ExplanationService;
use s2d_core::{Result, S2dError};
use serde::{Deserialize, Serialize};

/// Agent that asks a chat-completion model for plain-language explanations.
#[derive(Clone)]
pub struct ChatCompletionAgent {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
    prompt_template: String,
}

impl ChatCompletionAgent {
    /// Creates an agent from explanation settings and secrets.
    ///
    /// The model from secret.json (if any) overrides the configured one. An
    /// empty API key is accepted and sent as-is.
    pub fn from_config(config: &ExplanationConfig, secrets: &SecretConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: secrets.api_key().to_string(),
            model: secrets
                .model_name()
                .map(String::from)
                .unwrap_or_else(|| config.model.clone()),
            system_prompt: config.system_prompt.clone(),
            prompt_template: config.prompt_template.clone(),
        }
    }

    /// Creates an agent with default settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = ExplanationConfig::default();
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
            api_key: api_key.into(),
            model: config.model,
            system_prompt: config.system_prompt,
            prompt_template: config.prompt_template,
        }
    }

    /// Overrides the endpoint after construction.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Renders the user prompt for a disease label.
    pub fn render_prompt(&self, label: &str) -> Result<String> {
        Environment::new()
            .render_str(&self.prompt_template, context! { label => label })
            .map_err(|e| S2dError::config(format!("Invalid explanation prompt template: {e}")))
    }

    fn build_request(&self, label: &str) -> Result<ChatCompletionRequest> {
        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.render_prompt(label)?,
                },
            ],
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                S2dError::network(None, format!("Chat completion request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|err| S2dError::network(None, format!("Failed to read response: {err}")))?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body_text).map_err(|err| {
            S2dError::explanation(format!("Failed to parse chat completion response: {err}"))
        })?;

        parsed.first_content().ok_or_else(|| {
            S2dError::explanation("Chat completion returned no content in the response")
        })
    }
}

#[async_trait::async_trait]
impl ExplanationService for ChatCompletionAgent {
    async fn explain(&self, label: &str) -> Result<String> {
        let request = self.build_request(label)?;
        tracing::debug!(model = %self.model, label, "Requesting disease explanation");
        self.send_request(&request).await
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response body; every level is optional so a partial body is a `None`
/// rather than a deserialization panic.
#[derive(Deserialize, Debug, Default)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn map_http_error(status: StatusCode, body: String) -> S2dError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    S2dError::network(Some(status.as_u16()), message)
}
