use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_VERBOSITY};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub filter: FilterConfig,
    pub classification: ClassificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub output_path: PathBuf,
    pub create_output_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Drop rows with an empty value in any column, not only the credential ones
    pub require_all_columns: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub case_sensitive_usernames: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbosity: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            create_output_dir: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            require_all_columns: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY.to_string(),
        }
    }
}
