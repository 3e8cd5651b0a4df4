use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::client::MarianTranslator;
use super::interface::{LanguagePair, TranslateInterface};
use crate::config_manager::TranslationConfig;
use crate::inference_service::InferenceServiceClient;

/// Factory for pair-specific translators
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Load the translation model for `pair`.
    ///
    /// The model id is built from the configured template. Loading fails when no
    /// pretrained model exists for that exact ordered pair.
    pub async fn create_translator(
        config: &TranslationConfig,
        pair: &LanguagePair,
        service: Arc<InferenceServiceClient>,
    ) -> Result<Arc<dyn TranslateInterface>> {
        let model = config.model_id(&pair.source, &pair.target);
        info!("Loading translation model {} for {}", model, pair);

        let model_info = service.fetch_model_info(&model).await?;
        if let Some(tag) = model_info.pipeline_tag.as_deref() {
            if tag != "translation" {
                tracing::warn!("Model {} is tagged {}, not translation", model, tag);
            }
        }

        Ok(Arc::new(MarianTranslator::new(service, pair.clone(), model)))
    }
}
