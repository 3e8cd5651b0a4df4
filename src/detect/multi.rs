//! Whatlang first, lingua when whatlang is unsure.

use super::interface::LanguageDetector;
use super::lingua_detector::LinguaDetector;
use super::whatlang_detector::WhatlangDetector;
use crate::error::DetectionError;

/// Detector used by the service
pub struct MultiDetector {
    primary: WhatlangDetector,
    fallback: LinguaDetector,
}

impl MultiDetector {
    pub fn new() -> Self {
        tracing::info!("Initializing language detection");
        Self {
            primary: WhatlangDetector::new(),
            fallback: LinguaDetector::new(),
        }
    }
}

impl Default for MultiDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for MultiDetector {
    fn detect(&self, text: &str) -> Result<String, anyhow::Error> {
        let primary = self.primary.detect(text);
        if let Some(guess) = primary.as_ref().filter(|guess| guess.reliable) {
            return Ok(guess.code.to_string());
        }

        let code = self
            .fallback
            .detect(text)
            .or(primary.map(|guess| guess.code))
            .ok_or(DetectionError::Undetectable {
                chars: text.chars().count(),
            })?;
        Ok(code.to_string())
    }
}
