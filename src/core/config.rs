//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Surfacer reads an optional TOML config carrying a default graph document
//! path and default output toggles. CLI flags always override config values.
//!
//! # Locations
//!
//! Searched in order (first hit wins):
//! 1. `--config <path>` if given (missing file is an error)
//! 2. `$SURF_CONFIG` if set
//! 3. `./surf.toml`
//! 4. `<config dir>/surf/config.toml` (e.g. `~/.config/surf/config.toml`)
//!
//! When no file is found, defaults apply: public listing on, private and
//! error listings off.
//!
//! # Example
//!
//! ```toml
//! graph = "surface-graph.json"
//!
//! [output]
//! public = true
//! private = true
//! errors = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Default output toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputDefaults {
    /// List public paths (default true)
    pub public: Option<bool>,

    /// List private paths (default false)
    pub private: Option<bool>,

    /// List error records (default false)
    pub errors: Option<bool>,
}

/// Surfacer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default graph document to crawl when `--graph` is not given
    pub graph: Option<PathBuf>,

    /// Default output toggles
    pub output: Option<OutputDefaults>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` is the `--config` flag; when set, the file must exist and
    /// parse. Otherwise the standard locations are searched and a missing
    /// file simply yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                return Self::parse_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// The standard search locations, in precedence order.
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(env_path) = std::env::var_os("SURF_CONFIG") {
            paths.push(PathBuf::from(env_path));
        }
        paths.push(PathBuf::from("surf.toml"));
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("surf").join("config.toml"));
        }
        paths
    }

    /// Parse a single config file.
    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|err| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Default for the public listing toggle.
    pub fn public_default(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.public)
            .unwrap_or(true)
    }

    /// Default for the private listing toggle.
    pub fn private_default(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.private)
            .unwrap_or(false)
    }

    /// Default for the error listing toggle.
    pub fn errors_default(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.errors)
            .unwrap_or(false)
    }

    /// The configured default graph document, if any.
    pub fn graph(&self) -> Option<&Path> {
        self.graph.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_public_only() {
        let config = Config::default();
        assert!(config.public_default());
        assert!(!config.private_default());
        assert!(!config.errors_default());
        assert!(config.graph().is_none());
    }

    #[test]
    fn parses_full_config() {
        let file = write_config(
            "graph = \"fixtures/api.json\"\n\n[output]\npublic = false\nprivate = true\nerrors = true\n",
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.graph(), Some(Path::new("fixtures/api.json")));
        assert!(!config.public_default());
        assert!(config.private_default());
        assert!(config.errors_default());
    }

    #[test]
    fn partial_output_section_keeps_other_defaults() {
        let file = write_config("[output]\nprivate = true\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.public_default());
        assert!(config.private_default());
        assert!(!config.errors_default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("grpah = \"typo.json\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/surf.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
