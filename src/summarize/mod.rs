pub mod interface;
pub mod client;
pub mod factory;

pub use interface::SummarizeInterface;
pub use client::PegasusSummarizer;
pub use factory::SummarizerFactory;
