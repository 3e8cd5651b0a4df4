use async_trait::async_trait;

/// Abstractive summarization with a single fixed model
#[async_trait]
pub trait SummarizeInterface: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, anyhow::Error>;
}
