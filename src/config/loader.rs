//! Configuration file loading
//!
//! Reading and parsing are split: [`load_config_file`] only touches the
//! filesystem, while [`ConfigFile::parse`] is pure and is called from the
//! resolver so a malformed file is reported as a configuration error.

use crate::errors::ConfigError;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// Raw contents of a configuration file, tagged with where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub contents: String,
}

impl ConfigSource {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Values a configuration file may supply; every field is optional
///
/// YAML is the native format. Because YAML is a superset of JSON, a
/// `github_config.json` style file parses as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(default, alias = "github_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub push_code: Option<bool>,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl ConfigFile {
    /// Parse file contents; an empty file is an empty configuration
    pub fn parse(source: &ConfigSource) -> Result<Self, ConfigError> {
        if source.contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&source.contents).map_err(|e| ConfigError::InvalidFormat {
            path: source.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Read the configuration file if it exists
///
/// A missing file yields `Ok(None)`. Any other read failure (a directory, a
/// permission problem) is reported as [`ConfigError::InvalidFormat`].
pub fn load_config_file(path: &Path) -> Result<Option<ConfigSource>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(ConfigSource::new(path, contents))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::InvalidFormat {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
