//! Configuration loading and parsing.
//!
//! Parses `vimkeys.toml` (or an override path provided by the binary). Every
//! field is optional; missing sections take the firmware defaults (start in
//! Insert, `Esc` enters Normal, insert layer 0, two-space indent, held
//! motions). Unknown fields are ignored so older binaries accept newer files.
//! A file that fails to parse falls back to defaults and logs a warning
//! rather than refusing to start.

use anyhow::{Context, Result};
use core_events::KeyCode;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitialMode {
    #[default]
    Insert,
    Normal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModeConfig {
    #[serde(default)]
    pub initial: InitialMode,
    /// Key name (see `KeyCode::from_str`) that enters Normal from Insert.
    #[serde(default = "ModeConfig::default_normal_key")]
    pub normal_key: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            initial: InitialMode::default(),
            normal_key: Self::default_normal_key(),
        }
    }
}

impl ModeConfig {
    fn default_normal_key() -> String {
        "esc".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LayerConfig {
    #[serde(default)]
    pub insert: u8,
    /// Layer activated on entering Normal; none leaves layers alone.
    #[serde(default)]
    pub normal: Option<u8>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndentConfig {
    #[serde(default = "IndentConfig::default_size")]
    pub size: u8,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
        }
    }
}

impl IndentConfig {
    const fn default_size() -> u8 {
        2
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MotionConfig {
    /// Bare navigation presses and holds the output key until the input key
    /// is released; `false` taps on press instead.
    #[serde(default = "MotionConfig::default_hold")]
    pub hold: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            hold: Self::default_hold(),
        }
    }
}

impl MotionConfig {
    const fn default_hold() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub mode: ModeConfig,
    #[serde(default)]
    pub layers: LayerConfig,
    #[serde(default)]
    pub indent: IndentConfig,
    #[serde(default)]
    pub motions: MotionConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

impl Config {
    /// Parse TOML text; errors are returned, not defaulted.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file = toml::from_str::<ConfigFile>(content).context("parsing vimkeys config")?;
        Ok(Config {
            raw: Some(content.to_string()),
            file,
        })
    }

    /// Key that switches Insert to Normal.
    pub fn normal_key(&self) -> Result<KeyCode> {
        let name = &self.file.mode.normal_key;
        name.parse::<KeyCode>()
            .with_context(|| format!("mode.normal_key = {name:?}"))
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("vimkeys.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vimkeys").join("vimkeys.toml");
    }
    PathBuf::from("vimkeys.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match Config::from_toml(&content) {
        Ok(cfg) => {
            info!(
                target: "config",
                path = %path.display(),
                initial = ?cfg.file.mode.initial,
                hold = cfg.file.motions.hold,
                indent = cfg.file.indent.size,
                "config_loaded"
            );
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %format!("{e:#}"), "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
