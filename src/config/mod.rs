//! Configuration management.
//!
//! Settings live in `~/.tracklink/config.json`: where the link database is
//! and which table and column names address the link table. A missing file
//! falls back to built-in defaults; link parameter validation happens where
//! the linker is constructed, not here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::linker::LinkParams;
use crate::storage::ConnectionParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage connection settings.
    pub connection: ConnectionParams,

    /// Link table addressing.
    #[serde(default)]
    pub link: LinkParams,
}

impl Config {
    /// Load the config file, or built-in defaults if none exists.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Self::initial();
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Could not parse {}", path.display()))
    }

    /// Write the config file, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let text = serde_json::to_string_pretty(self)?;
        fs::write(&path, text).with_context(|| format!("Could not write {}", path.display()))
    }

    fn initial() -> Result<Self> {
        Ok(Self {
            connection: ConnectionParams {
                driver: "sqlite".to_string(),
                server: None,
                database: default_db_path()?.display().to_string(),
            },
            link: LinkParams::default(),
        })
    }
}

/// Directory holding the config file and the default database.
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Could not find home directory")?
        .join(".tracklink"))
}

/// Path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Path of the default link database.
pub fn default_db_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir.join("links.db"))
}
