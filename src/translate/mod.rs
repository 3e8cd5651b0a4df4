pub mod interface;
pub mod client;
pub mod factory;

pub use interface::{LanguagePair, TranslateInterface};
pub use client::MarianTranslator;
pub use factory::TranslatorFactory;
