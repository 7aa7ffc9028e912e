pub mod config;
pub mod loader;

pub use config::{ConfigLoadError, apply_bracket_file, load_config, parse_config};
pub use loader::{BracketLoader, BracketLoaderError, TaxBracketRecord};
