//! Explanation fetcher with a deterministic fallback.

use s2d_core::explanation::{Explanation, ExplanationService};
use s2d_core::prediction::Prediction;
use std::sync::Arc;

#[derive(Clone)]
pub struct ExplanationFetcher {
    service: Arc<dyn ExplanationService>,
}

impl ExplanationFetcher {
    pub fn new(service: Arc<dyn ExplanationService>) -> Self {
        Self { service }
    }

    /// Explains one prediction. Any service failure becomes the fallback text.
    pub async fn fetch(&self, prediction: &Prediction) -> Explanation {
        match self.service.explain(&prediction.label).await {
            Ok(text) => Explanation::from_service(text),
            Err(e) => {
                tracing::warn!(label = %prediction.label, error = %e, "Explanation unavailable, using fallback");
                Explanation::fallback(&prediction.label, prediction.probability)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2d_core::{Result, S2dError};

    struct StaticService(std::result::Result<String, S2dError>);

    #[async_trait::async_trait]
    impl ExplanationService for StaticService {
        async fn explain(&self, _label: &str) -> Result<String> {
            self.0.clone()
        }
    }

    fn fetcher(result: std::result::Result<String, S2dError>) -> ExplanationFetcher {
        ExplanationFetcher::new(Arc::new(StaticService(result)))
    }

    #[tokio::test]
    async fn test_service_text_is_used() {
        let explanation = fetcher(Ok("A skin condition.".to_string()))
            .fetch(&Prediction::new("Acne", 0.9))
            .await;

        assert_eq!(explanation, Explanation::from_service("A skin condition."));
    }

    #[tokio::test]
    async fn test_network_error_falls_back() {
        let explanation = fetcher(Err(S2dError::network(None, "connection refused")))
            .fetch(&Prediction::new("Malaria", 0.67))
            .await;

        assert!(explanation.is_fallback());
        assert_eq!(explanation.text, "Malaria is predicted with 0.67 confidence.");
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let explanation = fetcher(Err(S2dError::explanation("expected value at line 1")))
            .fetch(&Prediction::new("Malaria", 0.67))
            .await;

        assert_eq!(explanation.text, "Malaria is predicted with 0.67 confidence.");
    }
}
