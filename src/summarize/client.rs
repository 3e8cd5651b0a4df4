use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::interface::SummarizeInterface;
use crate::inference_service::InferenceServiceClient;

/// Summarization model run on the inference service
pub struct PegasusSummarizer {
    service: Arc<InferenceServiceClient>,
    model: String,
}

impl PegasusSummarizer {
    pub fn new(service: Arc<InferenceServiceClient>, model: String) -> Self {
        Self { service, model }
    }
}

#[async_trait]
impl SummarizeInterface for PegasusSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, anyhow::Error> {
        debug!("Summarizing {} chars with {}", text.chars().count(), self.model);
        let summary = self.service.generate(&self.model, text).await?;
        Ok(summary)
    }
}
