use crate::error::{InvError, Result};
use crate::model::Markers;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_INVENTORY_DIR: &str = "inventory";
const DEFAULT_JPG_SIZE: u32 = 1000;
const DEFAULT_JPG_QUALITY: u32 = 75;
const DEFAULT_VIEWER: &str = "gpicview";

/// Configuration for invtxt, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InvConfig {
    /// Directory holding `inv.txt` and the `pics/` directory
    pub inventory_dir: PathBuf,

    /// List items grouped by category instead of file order
    pub sorted: bool,

    /// Colored, aligned listing instead of raw lines
    pub pretty: bool,

    /// Longest side, in pixels, of imported pictures
    pub jpg_size: u32,

    /// JPEG quality of imported pictures
    pub jpg_quality: u32,

    /// Program used by `pics show`
    pub viewer: String,

    /// Never call ImageMagick; only .jpg files can be imported
    pub no_magick: bool,

    pub markers: Markers,
}

fn default_inventory_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_INVENTORY_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_DIR))
}

impl Default for InvConfig {
    fn default() -> Self {
        Self {
            inventory_dir: default_inventory_dir(),
            sorted: true,
            pretty: true,
            jpg_size: DEFAULT_JPG_SIZE,
            jpg_quality: DEFAULT_JPG_QUALITY,
            viewer: DEFAULT_VIEWER.to_string(),
            no_magick: false,
            markers: Markers::default(),
        }
    }
}

impl InvConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(InvError::Io)?;
        let config: InvConfig =
            serde_json::from_str(&content).map_err(InvError::Serialization)?;
        Ok(config)
    }

    /// Like [`InvConfig::load`], but writes the defaults on first use so the
    /// user has a file to edit.
    pub fn load_or_init<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(config_dir);
        }
        let config = Self::default();
        config.save(config_dir)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(InvError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(InvError::Serialization)?;
        fs::write(config_path, content).map_err(InvError::Io)?;
        Ok(())
    }

    pub fn config_path<P: AsRef<Path>>(config_dir: P) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILENAME)
    }
}
