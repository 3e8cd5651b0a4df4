use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::client::PegasusSummarizer;
use super::interface::SummarizeInterface;
use crate::config_manager::SummarizationConfig;
use crate::inference_service::InferenceServiceClient;

/// Factory for the summarization model
pub struct SummarizerFactory;

impl SummarizerFactory {
    /// Load the configured summarization model. It is not language-aware.
    pub async fn create_summarizer(
        config: &SummarizationConfig,
        service: Arc<InferenceServiceClient>,
    ) -> Result<Arc<dyn SummarizeInterface>> {
        info!("Loading summarization model {}", config.model);
        service.fetch_model_info(&config.model).await?;
        Ok(Arc::new(PegasusSummarizer::new(service, config.model.clone())))
    }
}
