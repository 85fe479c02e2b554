//! Secret service implementation.
//!
//! Resolves the explanation API key from secret.json, then from the
//! environment, and finally falls back to an empty key.

use crate::paths::S2dPaths;
use crate::storage::{SecretStorage, SecretStorageError};
use once_cell::sync::OnceCell;
use s2d_core::config::{GroqConfig, SecretConfig};
use s2d_core::secret::SecretService;
use s2d_core::{Result, S2dError};

/// Environment variable holding the explanation API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable overriding the explanation model.
pub const MODEL_NAME_ENV: &str = "GROQ_MODEL_NAME";

type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Service for loading secret configuration.
///
/// Priority:
/// 1. secret.json (when it holds a non-empty key)
/// 2. Environment variables (`GROQ_API_KEY`, `GROQ_MODEL_NAME`)
/// 3. Empty key, meaning "unset"
///
/// The result is cached after the first successful load.
pub struct SecretServiceImpl {
    storage: SecretStorage,
    env: EnvLookup,
    cached: OnceCell<SecretConfig>,
}

impl SecretServiceImpl {
    /// Creates a service reading `<config dir>/secret.json`.
    pub fn new(paths: &S2dPaths) -> Result<Self> {
        let storage = SecretStorage::new(paths).map_err(|e| S2dError::config(e.to_string()))?;
        Ok(Self::with_storage(storage))
    }

    pub fn with_storage(storage: SecretStorage) -> Self {
        Self {
            storage,
            env: process_env,
            cached: OnceCell::new(),
        }
    }

    /// Replaces the environment lookup (for testing).
    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    fn resolve(&self) -> Result<SecretConfig> {
        let from_file = match self.storage.load() {
            Ok(config) => Some(config),
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "secret.json not found");
                None
            }
            // Never echo file content: parse errors only carry positions.
            Err(e) => return Err(S2dError::config(format!("Failed to load secrets: {e}"))),
        };

        if let Some(config) = from_file.as_ref().filter(|c| !c.api_key().is_empty()) {
            return Ok(config.clone());
        }

        let env_key = (self.env)(API_KEY_ENV).filter(|k| !k.is_empty());
        let env_model = (self.env)(MODEL_NAME_ENV).filter(|m| !m.is_empty());

        if let Some(api_key) = env_key {
            tracing::debug!("Using API key from {API_KEY_ENV}");
            return Ok(SecretConfig {
                groq: Some(GroqConfig {
                    api_key,
                    model_name: env_model
                        .or_else(|| from_file.as_ref().and_then(|c| c.model_name().map(String::from))),
                }),
            });
        }

        tracing::warn!("No explanation API key configured; requests will use an empty key");
        Ok(from_file.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.cached.get_or_try_init(|| self.resolve()).cloned()
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.path().exists()
    }
}
