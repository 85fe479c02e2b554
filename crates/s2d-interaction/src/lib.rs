//! Clients for the external HTTP services: translation, chat-completion
//! explanations and speech synthesis.

pub mod chat_completion_agent;
pub mod google_translator;
pub mod google_tts;

pub use chat_completion_agent::ChatCompletionAgent;
pub use google_translator::GoogleTranslator;
pub use google_tts::GoogleSpeech;
