//! N-gram language detection backed by `lingua`, accurate on short text.

use lingua::{LanguageDetector as Lingua, LanguageDetectorBuilder};
use tracing::debug;

use super::languages::{code_for_lingua, lingua_languages};

pub struct LinguaDetector {
    detector: Lingua,
}

impl LinguaDetector {
    pub fn new() -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_languages(&lingua_languages()).build(),
        }
    }

    pub fn detect(&self, text: &str) -> Option<&'static str> {
        let language = self.detector.detect_language_of(text)?;
        let code = code_for_lingua(language)?;
        debug!("lingua guessed {}", code);
        Some(code)
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}
