pub mod calculations;
pub mod error;
pub mod models;

pub use error::{ConfigError, InvalidInput};
pub use models::*;
