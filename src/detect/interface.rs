/// Guesses the language of a piece of text
pub trait LanguageDetector: Send + Sync {
    /// Best-guess ISO 639-1 code such as `"en"` or `"fr"`.
    /// Errors when no language can be determined.
    fn detect(&self, text: &str) -> Result<String, anyhow::Error>;
}
