//! Translation service trait.

use crate::error::Result;

/// Text translation between language codes.
///
/// `source` may be [`crate::language::AUTO_DETECT`]. Implementations make a
/// single attempt per call; retries are not part of the contract.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}
