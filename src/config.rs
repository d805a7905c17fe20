use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Display/output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// If set, amounts are rounded (half away from zero) and padded to this
    /// many decimal places before being rendered as display strings.
    ///
    /// This is purely a presentation setting and does not affect
    /// calculations or the stored values.
    pub currency_decimals: Option<u32>,

    /// Optional currency symbol (e.g. "$") prefixed to display values.
    pub currency_symbol: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_decimals: Some(2),
            currency_symbol: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to data directory. If relative, resolved from the config file
    /// location. If not specified, defaults to the config file's directory.
    pub data_dir: Option<PathBuf>,

    /// Display/output formatting settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the data directory path.
    ///
    /// If `data_dir` is set and relative, it's resolved relative to
    /// `config_dir`. If `data_dir` is not set, returns `config_dir`.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(data_dir) if data_dir.is_absolute() => data_dir.clone(),
            Some(data_dir) => config_dir.join(data_dir),
            None => config_dir.to_path_buf(),
        }
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// The resolved data directory path.
    pub data_dir: PathBuf,

    /// Display/output formatting settings.
    pub display: DisplayConfig,
}

impl ResolvedConfig {
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self {
            data_dir: config.resolve_data_dir(config_dir),
            display: config.display,
        })
    }
}
