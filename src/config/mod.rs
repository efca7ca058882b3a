pub mod model;


use std::path::Path;
use tracing::debug;

use crate::constants::VERBOSITY_LEVELS;
use crate::core::error::{SiftError, SiftResult};

pub use self::model::{ClassificationConfig, Config, FilterConfig, IoConfig, LoggingConfig};

impl Config {
    pub fn from_file(path: &Path) -> SiftResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| SiftError::invalid_config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> SiftResult<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn to_file(&self, path: &Path) -> SiftResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SiftError::invalid_config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> SiftResult<()> {
        if !VERBOSITY_LEVELS.contains(&self.logging.verbosity.as_str()) {
            return Err(SiftError::invalid_config(format!(
                "verbosity must be one of {}",
                VERBOSITY_LEVELS.join(", ")
            )));
        }

        if self.io.output_path.as_os_str().is_empty() {
            return Err(SiftError::invalid_config("output_path cannot be empty"));
        }

        Ok(())
    }
}
