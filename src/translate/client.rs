use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::interface::{LanguagePair, TranslateInterface};
use crate::inference_service::InferenceServiceClient;

/// Pair-specific translation model run on the inference service
pub struct MarianTranslator {
    service: Arc<InferenceServiceClient>,
    pair: LanguagePair,
    model: String,
}

impl MarianTranslator {
    pub fn new(service: Arc<InferenceServiceClient>, pair: LanguagePair, model: String) -> Self {
        Self {
            service,
            pair,
            model,
        }
    }
}

#[async_trait]
impl TranslateInterface for MarianTranslator {
    fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        debug!("Translating {} chars with {}", text.chars().count(), self.model);
        let translated = self.service.generate(&self.model, text).await?;
        Ok(translated)
    }
}
