//! Configuration loading for the function host.

use crate::constants::DEFAULT_TTL_SECONDS;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings shared by every request the host serves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionConfig {
    /// Time-to-live attached to every response.
    #[serde(default = "get_default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Directory relative FileSystem template paths are resolved against.
    #[serde(default)]
    pub template_root: Option<PathBuf>,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self { ttl_seconds: get_default_ttl_seconds(), template_root: None }
    }
}

impl FunctionConfig {
    /// Loads the configuration from a JSON or YAML file, chosen by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

        let config: FunctionConfig = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| Error::ConfigError(format!("{}: {e}", path.display())))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| Error::ConfigError(format!("{}: {e}", path.display())))?,
            _ => {
                return Err(Error::ConfigError(format!(
                    "unsupported configuration file '{}', expected .json, .yaml or .yml",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ttl_seconds == 0 {
            return Err(Error::ConfigError("ttl_seconds must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

fn get_default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = FunctionConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(60));
        assert!(config.template_root.is_none());
    }

    #[test]
    fn loads_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("function.yaml");
        fs::write(&path, "ttl_seconds: 30\ntemplate_root: /templates\n").unwrap();

        let config = FunctionConfig::load(&path).unwrap();
        assert_eq!(config.ttl_seconds, 30);
        assert_eq!(config.template_root, Some(PathBuf::from("/templates")));
    }

    #[test]
    fn loads_json_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("function.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(FunctionConfig::load(&path).unwrap(), FunctionConfig::default());
    }

    #[test]
    fn rejects_zero_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("function.yml");
        fs::write(&path, "ttl_seconds: 0\n").unwrap();

        assert!(matches!(FunctionConfig::load(&path), Err(Error::ConfigError(_))));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("function.toml");
        fs::write(&path, "").unwrap();

        assert!(matches!(FunctionConfig::load(&path), Err(Error::ConfigError(_))));
    }
}
