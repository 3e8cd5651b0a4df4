pub mod settings;
pub mod utils;

pub use settings::*;
pub use utils::{load_config, load_defaults, locate_config_file};
