pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
pub mod utils;

pub use cli::{Cli, Command};
pub use commands::{load_finance_config, run};
