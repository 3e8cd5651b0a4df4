use std::sync::Arc;

use crate::config_manager::AppConfig;
use crate::detect::MultiDetector;
use crate::inference_service::InferenceServiceClient;
use crate::model_pool::ModelRegistry;
use crate::pipeline::ArticlePipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: ArticlePipeline,
    pub inference_service: Arc<InferenceServiceClient>,
}

impl AppState {
    /// Wire the production collaborators from configuration
    pub fn new(config: AppConfig) -> Self {
        let inference_service = Arc::new(InferenceServiceClient::new(&config.inference));
        let models = Arc::new(ModelRegistry::new(
            inference_service.clone(),
            config.translation.clone(),
            config.summarization.clone(),
            config.models.cache_models,
        ));
        let pipeline = ArticlePipeline::new(Arc::new(MultiDetector::new()), models);

        Self::with_pipeline(config, pipeline, inference_service)
    }

    pub fn with_pipeline(
        config: AppConfig,
        pipeline: ArticlePipeline,
        inference_service: Arc<InferenceServiceClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
            inference_service,
        }
    }
}
