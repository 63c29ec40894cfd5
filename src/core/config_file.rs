//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphpath/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::typography::TypographicOptions;

/// Built-in text size in points
pub const DEFAULT_SIZE: f64 = 12.0;

/// User configuration from ~/.config/glyphpath/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Text size in points
    pub default_size: Option<f64>,
    /// Smart quotes, dashes, ellipses and fractions
    pub typography: Option<bool>,
    pub common_ligatures: Option<bool>,
    pub historical_ligatures: Option<bool>,
    /// Also write logs to ~/.config/glyphpath/logs/
    pub log_to_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the glyphpath config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphpath")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file with every option spelled out at its default
    pub fn with_defaults() -> Self {
        let options = TypographicOptions::default();
        Self {
            default_size: Some(DEFAULT_SIZE),
            typography: Some(options.typography),
            common_ligatures: Some(options.common_ligatures),
            historical_ligatures: Some(options.historical_ligatures),
            log_to_file: Some(false),
        }
    }

    /// Typographic options from this file, built-in defaults for the rest
    pub fn typographic_options(&self) -> TypographicOptions {
        let defaults = TypographicOptions::default();
        TypographicOptions {
            typography: self.typography.unwrap_or(defaults.typography),
            common_ligatures: self.common_ligatures.unwrap_or(defaults.common_ligatures),
            historical_ligatures: self
                .historical_ligatures
                .unwrap_or(defaults.historical_ligatures),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyphpath directory structure
    /// 2. A settings.json file with default values
    /// 3. The logs/ directory
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    pub fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::with_defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
