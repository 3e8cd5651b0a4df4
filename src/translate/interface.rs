use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Ordered source/target language pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Translation for one fixed language pair
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// The pair this translator was loaded for
    fn pair(&self) -> &LanguagePair;

    async fn translate(&self, text: &str) -> Result<String, anyhow::Error>;
}
