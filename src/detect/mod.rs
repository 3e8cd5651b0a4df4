pub mod interface;
pub mod languages;
pub mod lingua_detector;
pub mod multi;
pub mod whatlang_detector;

pub use interface::LanguageDetector;
pub use lingua_detector::LinguaDetector;
pub use multi::MultiDetector;
pub use whatlang_detector::WhatlangDetector;
