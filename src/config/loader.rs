//! Configuration context loading

use crate::config::types::RenderConfig;
use crate::constants::CONFIG_EXTENSIONS;
use crate::error::{Error, Result};
use std::path::Path;

impl RenderConfig {
    /// Loads a configuration context from a JSON or YAML file, chosen by extension.
    ///
    /// The returned context is already normalized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

        if !CONFIG_EXTENSIONS.contains(&extension) {
            return Err(Error::ConfigFormat {
                path: path.display().to_string(),
                expected: CONFIG_EXTENSIONS.join(", "),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            Error::ReadError { path: path.display().to_string(), source }
        })?;
        log::debug!("Loading configuration context from '{}'", path.display());

        match extension {
            "json" => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(content)?;
        Ok(config.normalized())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: RenderConfig = serde_yaml::from_str(content)?;
        Ok(config.normalized())
    }
}
