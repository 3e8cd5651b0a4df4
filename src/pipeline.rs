//! Detect, translate if needed, summarize.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::detect::LanguageDetector;
use crate::error::AppError;
use crate::model_pool::ModelProvider;
use crate::translate::LanguagePair;

/// Validated input for one run of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub article: String,
    pub target_language: String,
}

impl ProcessRequest {
    /// Pull `article` and `target_language` out of a JSON body.
    ///
    /// A missing, null, empty or non-string `article` is rejected. A missing or
    /// null `target_language` falls back to `default_target`.
    pub fn from_json(body: &Value, default_target: &str) -> Result<Self, AppError> {
        let article = body
            .get("article")
            .and_then(Value::as_str)
            .filter(|article| !article.is_empty())
            .ok_or(AppError::MissingArticle)?;

        let target_language = match body.get("target_language") {
            None | Some(Value::Null) => default_target.to_string(),
            Some(Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            article: article.to_string(),
            target_language,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub translated_text: String,
    pub summary: String,
}

/// The request pipeline. Holds no per-request state.
#[derive(Clone)]
pub struct ArticlePipeline {
    detector: Arc<dyn LanguageDetector>,
    models: Arc<dyn ModelProvider>,
}

impl ArticlePipeline {
    pub fn new(detector: Arc<dyn LanguageDetector>, models: Arc<dyn ModelProvider>) -> Self {
        Self { detector, models }
    }

    pub async fn process(&self, request: &ProcessRequest) -> anyhow::Result<ProcessResponse> {
        let source_language = self.detector.detect(&request.article)?;
        let pair = LanguagePair::new(source_language, request.target_language.clone());
        debug!("Article language pair {}", pair);

        let translated_text = if pair.is_identity() {
            debug!("Source matches target, skipping translation");
            request.article.clone()
        } else {
            let translator = self.models.translator(&pair).await?;
            translator.translate(&request.article).await?
        };

        let summarizer = self.models.summarizer().await?;
        let summary = summarizer.summarize(&translated_text).await?;

        info!(
            "Processed article: pair={}, chars_in={}, summary_chars={}",
            pair,
            request.article.chars().count(),
            summary.chars().count()
        );

        Ok(ProcessResponse {
            translated_text,
            summary,
        })
    }
}
