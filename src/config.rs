use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::control::pid::PidController;
use crate::error::{PidError, Result};
use crate::types::{Gains, IntegralLimit, OutputShaping};

/// Configuration of a single controller, as read from a TOML file
///
/// ```toml
/// target = 10.0
/// tolerance = 0.5
///
/// [gains]
/// p = 1.0
/// i = 0.5
/// d = 0.1
///
/// [integral_limit]
/// min = -100.0
/// max = 100.0
///
/// [output]
/// min = -100.0
/// max = 100.0
/// min_threshold = 0.0
/// ```
///
/// Every key is optional, missing keys take the controller defaults. A missing `target` leaves
/// the controller tracking the measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub target: Option<f64>,
    pub tolerance: f64,
    pub gains: Gains,
    pub integral_limit: IntegralLimit,
    pub output: OutputShaping,
}

impl ControllerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Parse controller config")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Serialize controller config")
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<ControllerConfig> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Read controller config {}", path.display()))?;

    ControllerConfig::from_toml_str(&source)
        .with_context(|| format!("Load controller config {}", path.display()))
}

impl PidController {
    /// Builds a controller by running every setter with the configured values
    pub fn from_config(config: &ControllerConfig) -> std::result::Result<Self, PidError> {
        let mut pid = PidController::new(config.gains);

        if let Some(target) = config.target {
            pid.set_target(Some(target));
        }

        pid.set_integral_limit(config.integral_limit.min, config.integral_limit.max);
        pid.set_output_shaping(
            config.output.min,
            config.output.max,
            config.output.min_threshold,
        );
        pid.set_tolerance(config.tolerance)?;

        Ok(pid)
    }
}
