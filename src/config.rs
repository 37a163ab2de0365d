//! Configuration management and validation.
//!
//! Provides the derivation engine configuration: strictness, identity guessing,
//! unit preferences and table locations, with layered loading from defaults,
//! a TOML file and environment variables.

use crate::app::services::record_emitter::units;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_PREFERRED_UNITS, DEFAULT_TABLE_VERSION,
    DEFAULT_VALUE_PRECISION, ENV_PREFIX, MAX_VALUE_PRECISION,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for BUFR to GeoJSON transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raise invalid dates and missing coordinates instead of logging them
    pub strict: bool,

    /// Synthesize WIGOS identifiers for legacy identification schemes
    pub guess_wsi: bool,

    /// Abort on the first failed subset or message
    pub fail_on_error: bool,

    /// Decimals kept after a preferred-unit conversion
    pub value_precision: u32,

    /// Unit preferences: source units -> preferred units
    pub preferred_units: BTreeMap<String, String>,

    /// Table version used when a message header carries none
    pub default_table_version: u32,

    /// Root directory of `{version}/BUFRCREX_CodeFlag_en.txt` tables
    pub tables_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            guess_wsi: false,
            fail_on_error: false,
            value_precision: DEFAULT_VALUE_PRECISION,
            preferred_units: DEFAULT_PREFERRED_UNITS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            default_table_version: DEFAULT_TABLE_VERSION,
            tables_path: None,
        }
    }
}

impl Config {
    /// Enable strict mode
    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Enable WIGOS identifier synthesis for legacy schemes
    pub fn with_guess_wsi(mut self) -> Self {
        self.guess_wsi = true;
        self
    }

    /// Abort on the first failure
    pub fn with_fail_on_error(mut self) -> Self {
        self.fail_on_error = true;
        self
    }

    /// Set the value precision used after unit conversion
    pub fn with_value_precision(mut self, precision: u32) -> Self {
        self.value_precision = precision;
        self
    }

    /// Set the code/flag table root directory
    pub fn with_tables_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tables_path = Some(path.into());
        self
    }

    /// Set the fallback table version
    pub fn with_default_table_version(mut self, version: u32) -> Self {
        self.default_table_version = version;
        self
    }

    /// Replace the unit preferences
    pub fn with_preferred_units(mut self, preferred_units: BTreeMap<String, String>) -> Self {
        self.preferred_units = preferred_units;
        self
    }

    /// Preferred units for a source unit, if any
    pub fn preferred_unit(&self, units: &str) -> Option<&str> {
        self.preferred_units.get(units).map(String::as_str)
    }

    /// Default configuration file location (`<config dir>/bufr2geojson/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Load configuration with layered approach (defaults -> file -> environment)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BUFR2GEOJSON_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}_{}", ENV_PREFIX, suffix));

        if let Some(value) = var("STRICT") {
            self.strict = parse_env_bool("STRICT", &value)?;
        }
        if let Some(value) = var("GUESS_WSI") {
            self.guess_wsi = parse_env_bool("GUESS_WSI", &value)?;
        }
        if let Some(value) = var("FAIL_ON_ERROR") {
            self.fail_on_error = parse_env_bool("FAIL_ON_ERROR", &value)?;
        }
        if let Some(value) = var("TABLES_PATH") {
            self.tables_path = Some(PathBuf::from(value));
        }
        if let Some(value) = var("TABLE_VERSION") {
            self.default_table_version = value.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{}_TABLE_VERSION must be an integer, got '{}'",
                    ENV_PREFIX, value
                ))
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.value_precision > MAX_VALUE_PRECISION {
            return Err(Error::configuration(format!(
                "value_precision {} exceeds maximum of {}",
                self.value_precision, MAX_VALUE_PRECISION
            )));
        }

        for (from, to) in &self.preferred_units {
            if !units::is_supported(from, to) {
                return Err(Error::configuration(format!(
                    "Unsupported preferred unit conversion '{}' -> '{}'",
                    from, to
                )));
            }
        }

        if let Some(path) = &self.tables_path {
            if !path.is_dir() {
                return Err(Error::configuration(format!(
                    "Tables path {} is not a directory",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

fn parse_env_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{}_{} must be a boolean, got '{}'",
            ENV_PREFIX, name, other
        ))),
    }
}
