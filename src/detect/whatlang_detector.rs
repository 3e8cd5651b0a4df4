//! Trigram language detection backed by `whatlang`.

use tracing::debug;
use whatlang::Detector;

use super::languages::{code_for_whatlang, whatlang_allowlist};

/// Texts shorter than this are never trusted to whatlang alone
pub const MIN_RELIABLE_CHARS: usize = 40;

/// A whatlang guess and whether it can be used without a second opinion
#[derive(Debug, Clone, PartialEq)]
pub struct WhatlangGuess {
    pub code: &'static str,
    pub confidence: f64,
    pub reliable: bool,
}

/// Whatlang detector restricted to the supported languages
pub struct WhatlangDetector {
    detector: Detector,
}

impl WhatlangDetector {
    pub fn new() -> Self {
        Self {
            detector: Detector::with_allowlist(whatlang_allowlist()),
        }
    }

    pub fn detect(&self, text: &str) -> Option<WhatlangGuess> {
        let info = self.detector.detect(text)?;
        let code = code_for_whatlang(info.lang())?;
        let reliable = info.is_reliable() && text.chars().count() >= MIN_RELIABLE_CHARS;
        debug!(
            "whatlang guessed {} (confidence {:.2}, reliable {})",
            code,
            info.confidence(),
            reliable
        );
        Some(WhatlangGuess {
            code,
            confidence: info.confidence(),
            reliable,
        })
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}
