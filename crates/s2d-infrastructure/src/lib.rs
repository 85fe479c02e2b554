pub mod artifacts;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::artifacts::{ArtifactLoader, LoadedArtifacts};
pub use crate::paths::S2dPaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::storage::{ConfigStorage, SecretStorage};
