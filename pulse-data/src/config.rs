//! Finance configuration loading from TOML files.
//!
//! Any key left out of the file keeps its 2024/25 default, so a file only
//! needs to list what differs:
//!
//! ```toml
//! tax_year = 2024
//!
//! [payroll]
//! medical_aid_monthly = "1850"
//!
//! [commute]
//! weeks_per_month = "4.345"
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use pulse_core::{ConfigError, FinanceConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::loader::{BracketLoader, BracketLoaderError};

/// Errors that can occur while loading a [`FinanceConfig`].
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Brackets(#[from] BracketLoaderError),

    #[error("invalid config")]
    Invalid(#[from] ConfigError),
}

/// Parses and validates a configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<FinanceConfig, ConfigLoadError> {
    let config: FinanceConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FinanceConfig, ConfigLoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&contents)?;
    info!(path = %path.display(), tax_year = config.tax_year, "Loaded finance config");
    Ok(config)
}

/// Replaces the bracket table in `config` with the one for
/// `config.tax_year` from a brackets CSV file.
pub fn apply_bracket_file<P: AsRef<Path>>(
    mut config: FinanceConfig,
    path: P,
) -> Result<FinanceConfig, ConfigLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = BracketLoader::parse(file)?;
    debug!(path = %path.display(), records = records.len(), "Parsed bracket file");

    config.brackets = BracketLoader::table_for_year(&records, config.tax_year)?;
    Ok(config)
}
