//! Pipeline configuration.
//!
//! Gains scale published signals only; they never feed back into learners or
//! envelopes, so the pipeline state is identical for any gain setting.

use std::fs;
use std::path::{Path, PathBuf};

use rumble_errors::{ConfigError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Largest accepted gain multiplier.
pub const MAX_GAIN: f64 = 4.0;

/// Prefix used for published signal names when none is configured.
pub const DEFAULT_SIGNAL_PREFIX: &str = "Rumble";

/// Top-level configuration for a [`HapticPipeline`](crate::HapticPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Published names are `"{signal_prefix}.{signal}"`.
    pub signal_prefix: String,
    pub gains: GainConfig,
    pub debug: DebugConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            signal_prefix: DEFAULT_SIGNAL_PREFIX.to_string(),
            gains: GainConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

/// One multiplier per output family; all default to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GainConfig {
    pub global: f64,
    pub road_feel: f64,
    pub suspension_impact: f64,
    pub suspension_vibration: f64,
    pub engine_tyres: f64,
    pub brake_feel: f64,
    pub brake_n_slip: f64,
    pub abs: f64,
    pub traction: f64,
    pub clutch_free: f64,
    pub gearshift: f64,
}

impl Default for GainConfig {
    fn default() -> Self {
        Self {
            global: 1.0,
            road_feel: 1.0,
            suspension_impact: 1.0,
            suspension_vibration: 1.0,
            engine_tyres: 1.0,
            brake_feel: 1.0,
            brake_n_slip: 1.0,
            abs: 1.0,
            traction: 1.0,
            clutch_free: 1.0,
            gearshift: 1.0,
        }
    }
}

impl GainConfig {
    /// Every gain with its dotted field path.
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("gains.global", self.global),
            ("gains.road_feel", self.road_feel),
            ("gains.suspension_impact", self.suspension_impact),
            ("gains.suspension_vibration", self.suspension_vibration),
            ("gains.engine_tyres", self.engine_tyres),
            ("gains.brake_feel", self.brake_feel),
            ("gains.brake_n_slip", self.brake_n_slip),
            ("gains.abs", self.abs),
            ("gains.traction", self.traction),
            ("gains.clutch_free", self.clutch_free),
            ("gains.gearshift", self.gearshift),
        ]
    }

    /// Reject non-finite, negative and oversized gains.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.entries() {
            ValidationError::ensure_within(field, value, 0.0, MAX_GAIN)?;
        }
        Ok(())
    }
}

/// Per-tick diagnostic CSV log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    pub enabled: bool,
    /// Directory receiving `rumble_*.csv` files; created when missing.
    pub log_dir: PathBuf,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: PathBuf::from("logs").join("rumble"),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ConfigError::parse("yaml", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::parse("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(extension).into()),
        };

        info!(
            path = %path.display(),
            prefix = %config.signal_prefix,
            debug = config.debug.enabled,
            "Loaded pipeline configuration"
        );
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::parse("yaml", e.to_string()).into())
    }

    /// Check the prefix and every gain.
    pub fn validate(&self) -> Result<()> {
        if self.signal_prefix.trim().is_empty() {
            return Err(ValidationError::required("signal_prefix").into());
        }
        if self.signal_prefix.contains(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "signal_prefix",
                "must not contain whitespace",
            )
            .into());
        }
        self.gains.validate()
    }
}
