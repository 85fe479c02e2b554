//! Unified path management for Symptom2Disease configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/symptom2disease/   # Config directory (platform config dir)
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//! ```
//!
//! `S2D_CONFIG_DIR` replaces the whole directory, which is handy for
//! containers and tests.

use std::path::{Path, PathBuf};

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "symptom2disease";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "S2D_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine the config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for s2d_core::S2dError {
    fn from(err: PathError) -> Self {
        s2d_core::S2dError::config(err.to_string())
    }
}

/// Resolves configuration paths.
///
/// Resolution order for the config directory:
/// 1. Explicit base path given to [`S2dPaths::new`]
/// 2. `S2D_CONFIG_DIR`
/// 3. `<platform config dir>/symptom2disease`
#[derive(Debug, Clone, Default)]
pub struct S2dPaths {
    base: Option<PathBuf>,
}

impl S2dPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }

        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }
}
