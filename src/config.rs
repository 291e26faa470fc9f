//! Config loading and persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Effect, Transience};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attribution recorded on shelving-log entries.
    pub shelving_actor: String,
    /// Attribution recorded on transfer-log entries.
    pub transfer_actor: String,
    pub baseline: BaselineConfig,
    pub covers: CoversConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shelving_actor: "Alan (Volunteer)".to_string(),
            transfer_actor: "Transfer Staff".to_string(),
            baseline: BaselineConfig::default(),
            covers: CoversConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub catalog_path: PathBuf,
    pub shelving_path: PathBuf,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/books.json"),
            shelving_path: PathBuf::from("data/shelving.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoversConfig {
    pub enabled: bool,
    /// Cover image host; candidate URLs are built against this.
    pub covers_endpoint: String,
    /// Title/author search endpoint used when no isbn/olid is known.
    pub search_endpoint: String,
}

impl Default for CoversConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            covers_endpoint: "https://covers.openlibrary.org".to_string(),
            search_endpoint: "https://openlibrary.org/search.json".to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write config {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn transience(&self) -> Transience {
        match self {
            Self::Read { .. } | Self::Write { .. } => Transience::Unknown,
            Self::Parse { .. } => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Self::Write { .. } => Effect::Unknown,
            _ => Effect::None,
        }
    }
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config, falling back to defaults (and writing them out) when
/// the file is missing or unreadable.
pub fn load_or_init(path: &Path) -> Config {
    if path.exists() {
        match load(path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                return Config::default();
            }
        }
    }

    let cfg = Config::default();
    if let Err(e) = write_config(path, &cfg) {
        tracing::warn!("failed to write default config: {e}");
    }
    cfg
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let contents = toml::to_string_pretty(cfg).unwrap_or_default();
    fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_roles() {
        let cfg = Config::default();
        assert_eq!(cfg.shelving_actor, "Alan (Volunteer)");
        assert_eq!(cfg.transfer_actor, "Transfer Staff");
        assert!(cfg.covers.enabled);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stacks.toml");
        let mut cfg = Config::default();
        cfg.shelving_actor = "Morgan (Volunteer)".to_string();
        write_config(&path, &cfg).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.shelving_actor, "Morgan (Volunteer)");
        assert_eq!(loaded.baseline.catalog_path, PathBuf::from("data/books.json"));
    }

    #[test]
    fn load_or_init_writes_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/stacks.toml");
        let cfg = load_or_init(&path);
        assert_eq!(cfg.transfer_actor, "Transfer Staff");
        assert!(path.exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stacks.toml");
        fs::write(&path, "shelving_actor = \"Sam\"\n").unwrap();
        let cfg = load(&path).unwrap();
        assert_eq!(cfg.shelving_actor, "Sam");
        assert_eq!(cfg.transfer_actor, "Transfer Staff");
    }
}
