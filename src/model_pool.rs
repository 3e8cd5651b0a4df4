//! Model loading for the request pipeline.
//!
//! With `models.cache_models` off every call loads the model again, the same
//! as loading per request. With it on, loaded handles are kept in a map keyed
//! by capability and language pair.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::config_manager::{SummarizationConfig, TranslationConfig};
use crate::inference_service::InferenceServiceClient;
use crate::summarize::{SummarizeInterface, SummarizerFactory};
use crate::translate::{LanguagePair, TranslateInterface, TranslatorFactory};

/// Hands out the models the pipeline needs
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn translator(&self, pair: &LanguagePair) -> anyhow::Result<Arc<dyn TranslateInterface>>;

    async fn summarizer(&self) -> anyhow::Result<Arc<dyn SummarizeInterface>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    Translation,
    Summarization,
}

/// Pool key: capability plus the language pair for translators
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub capability: Capability,
    pub pair: Option<LanguagePair>,
}

impl ModelKey {
    pub fn translation(pair: &LanguagePair) -> Self {
        Self {
            capability: Capability::Translation,
            pair: Some(pair.clone()),
        }
    }

    pub fn summarization() -> Self {
        Self {
            capability: Capability::Summarization,
            pair: None,
        }
    }
}

#[derive(Clone)]
enum LoadedModel {
    Translator(Arc<dyn TranslateInterface>),
    Summarizer(Arc<dyn SummarizeInterface>),
}

/// Model provider backed by the hub and inference service
pub struct ModelRegistry {
    service: Arc<InferenceServiceClient>,
    translation: TranslationConfig,
    summarization: SummarizationConfig,
    cache_models: bool,
    loaded: DashMap<ModelKey, LoadedModel>,
}

impl ModelRegistry {
    pub fn new(
        service: Arc<InferenceServiceClient>,
        translation: TranslationConfig,
        summarization: SummarizationConfig,
        cache_models: bool,
    ) -> Self {
        Self {
            service,
            translation,
            summarization,
            cache_models,
            loaded: DashMap::new(),
        }
    }

    /// Number of models currently held
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    fn cached(&self, key: &ModelKey) -> Option<LoadedModel> {
        if !self.cache_models {
            return None;
        }
        self.loaded.get(key).map(|entry| entry.value().clone())
    }

    fn remember(&self, key: ModelKey, model: LoadedModel) {
        if self.cache_models {
            debug!("Pooling model for {:?}", key);
            self.loaded.insert(key, model);
        }
    }
}

#[async_trait]
impl ModelProvider for ModelRegistry {
    async fn translator(&self, pair: &LanguagePair) -> anyhow::Result<Arc<dyn TranslateInterface>> {
        let key = ModelKey::translation(pair);
        if let Some(LoadedModel::Translator(translator)) = self.cached(&key) {
            return Ok(translator);
        }

        let translator =
            TranslatorFactory::create_translator(&self.translation, pair, self.service.clone())
                .await?;
        self.remember(key, LoadedModel::Translator(translator.clone()));
        Ok(translator)
    }

    async fn summarizer(&self) -> anyhow::Result<Arc<dyn SummarizeInterface>> {
        let key = ModelKey::summarization();
        if let Some(LoadedModel::Summarizer(summarizer)) = self.cached(&key) {
            return Ok(summarizer);
        }

        let summarizer =
            SummarizerFactory::create_summarizer(&self.summarization, self.service.clone()).await?;
        self.remember(key, LoadedModel::Summarizer(summarizer.clone()));
        Ok(summarizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_manager::{load_defaults, InferenceConfig};
    use mockito::{Server, ServerGuard};
    use serde_json::json;

    fn registry(server: &ServerGuard, cache_models: bool) -> ModelRegistry {
        let config = load_defaults().unwrap();
        let service = Arc::new(InferenceServiceClient::new(&InferenceConfig {
            hub_url: server.url(),
            inference_url: server.url(),
            api_token: None,
        }));
        ModelRegistry::new(
            service,
            config.translation,
            config.summarization,
            cache_models,
        )
    }

    #[tokio::test]
    async fn reloads_per_call_when_pooling_is_off() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/models/google/pegasus-xsum")
            .with_status(200)
            .with_body(json!({"id": "google/pegasus-xsum", "pipeline_tag": "summarization"}).to_string())
            .expect(2)
            .create_async()
            .await;

        let registry = registry(&server, false);
        registry.summarizer().await.unwrap();
        registry.summarizer().await.unwrap();

        mock.assert_async().await;
        assert_eq!(registry.loaded_count(), 0);
    }

    #[tokio::test]
    async fn pools_models_by_key_when_enabled() {
        let mut server = Server::new_async().await;
        let fr_en = server
            .mock("GET", "/api/models/Helsinki-NLP/opus-mt-fr-en")
            .with_status(200)
            .with_body(json!({"id": "Helsinki-NLP/opus-mt-fr-en", "pipeline_tag": "translation"}).to_string())
            .expect(1)
            .create_async()
            .await;
        let de_en = server
            .mock("GET", "/api/models/Helsinki-NLP/opus-mt-de-en")
            .with_status(200)
            .with_body(json!({"id": "Helsinki-NLP/opus-mt-de-en", "pipeline_tag": "translation"}).to_string())
            .expect(1)
            .create_async()
            .await;

        let registry = registry(&server, true);
        let first = registry.translator(&LanguagePair::new("fr", "en")).await.unwrap();
        let second = registry.translator(&LanguagePair::new("fr", "en")).await.unwrap();
        let other = registry.translator(&LanguagePair::new("de", "en")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(other.pair(), &LanguagePair::new("de", "en"));
        assert_eq!(registry.loaded_count(), 2);
        fr_en.assert_async().await;
        de_en.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_pair_fails_to_load_and_is_not_pooled() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/models/Helsinki-NLP/opus-mt-en-xx")
            .with_status(404)
            .create_async()
            .await;

        let registry = registry(&server, true);
        let result = registry.translator(&LanguagePair::new("en", "xx")).await;
        assert!(result.is_err());
        assert_eq!(registry.loaded_count(), 0);
    }
}
