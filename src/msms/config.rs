//! # Configuration
//!
//! Settings are resolved in priority order (highest first):
//! 1. **CLI flags**: `--data` (applied by the binary)
//! 2. **Environment variables**: `MSMS_DATA`, `MSMS_CARDS_DIR`
//! 3. **Config file**: `--config <path>`, else `MSMS_CONFIG`, else
//!    `config.json` in the platform config directory (via `directories`)
//! 4. **Compiled defaults**
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `msms.json` | Backing file for all records |
//! | `cards_dir` | `.` | Where student cards go when no file name is given |

use crate::commands::card::default_file_name;
use crate::error::{MsmsError, Result};
use crate::model::EntityId;
use crate::store::fs::DEFAULT_DATA_FILE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_ENV: &str = "MSMS_CONFIG";
pub const DATA_ENV: &str = "MSMS_DATA";
pub const CARDS_DIR_ENV: &str = "MSMS_CARDS_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MsmsConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_cards_dir")]
    pub cards_dir: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_cards_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for MsmsConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            cards_dir: default_cards_dir(),
        }
    }
}

impl MsmsConfig {
    /// Load config from `config_path`, or return defaults if the file is missing.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(MsmsError::Config(format!(
                    "cannot read {}: {}",
                    config_path.display(),
                    err
                )))
            }
        };
        serde_json::from_str(&content).map_err(|err| {
            MsmsError::Config(format!("invalid {}: {}", config_path.display(), err))
        })
    }

    /// Platform config file location, e.g. `~/.config/msms/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "msms", "msms").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Full resolution from the process environment.
    pub fn resolve(explicit_path: Option<&Path>) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup);
        Ok(config)
    }

    /// Overlay environment variable overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_file) = lookup(DATA_ENV) {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(cards_dir) = lookup(CARDS_DIR_ENV) {
            self.cards_dir = PathBuf::from(cards_dir);
        }
    }

    /// Default destination for a student's card.
    pub fn card_path(&self, student_id: EntityId) -> PathBuf {
        self.cards_dir.join(default_file_name(student_id))
    }
}
