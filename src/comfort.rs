use crate::config::ComfortConfig;
use crate::errors::ConfigError;

/// Allowed indoor temperature band for one day, closed on both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComfortBand {
    pub lower: f64,
    pub upper: f64,
}

/// Maps a running-mean outdoor temperature to the allowed indoor band.
///
/// The comfort temperature follows the adaptive regression
/// `T_comfort = slope * Trm + intercept`; the band extends half the
/// configured deadband to either side.
#[derive(Clone, Debug, PartialEq)]
pub struct ComfortLimitModel {
    slope: f64,
    intercept: f64,
    deadband: f64,
}

impl ComfortLimitModel {
    pub fn try_new(slope: f64, intercept: f64, deadband: f64) -> Result<Self, ConfigError> {
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ConfigError(
                "comfort regression coefficients should be finite".to_string(),
            ));
        }
        if !deadband.is_finite() || deadband <= 0.0 {
            return Err(ConfigError(
                "deadband widths should be positive".to_string(),
            ));
        }
        Ok(ComfortLimitModel {
            slope,
            intercept,
            deadband,
        })
    }
    /// Build the model from an already validated configuration, resolving
    /// method defaults, overrides and the selected comfort class.
    pub fn from_config(config: &ComfortConfig) -> Self {
        ComfortLimitModel {
            slope: config.slope(),
            intercept: config.intercept(),
            deadband: config.deadband(),
        }
    }
    pub fn slope(&self) -> f64 {
        self.slope
    }
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
    pub fn deadband(&self) -> f64 {
        self.deadband
    }
    pub fn comfort_temperature(&self, running_mean: f64) -> f64 {
        self.slope * running_mean + self.intercept
    }
    pub fn band(&self, running_mean: f64) -> ComfortBand {
        let center = self.comfort_temperature(running_mean);
        let half_width = self.deadband / 2.0;
        ComfortBand {
            lower: center - half_width,
            upper: center + half_width,
        }
    }
}
