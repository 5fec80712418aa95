use crate::errors::ConfigError;
use crate::TimeStamp;
use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comfort class selecting the allowed band width around the comfort
/// temperature, class I being the most demanding.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ComfortClass {
    I,
    II,
    III,
}

impl fmt::Display for ComfortClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            ComfortClass::I => "I",
            ComfortClass::II => "II",
            ComfortClass::III => "III",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ComfortClass {
    type Err = ConfigError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_uppercase().as_str() {
            "I" | "1" => Ok(ComfortClass::I),
            "II" | "2" => Ok(ComfortClass::II),
            "III" | "3" => Ok(ComfortClass::III),
            _ => Err(ConfigError(format!("unknown comfort class '{}'", name))),
        }
    }
}

/// Comfort-limit formula variant. Each method carries its own default
/// regression coefficients; explicit slope/intercept overrides in
/// [`ComfortConfig`] take precedence.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LimitMethod {
    Basic,
    Extended,
}

impl LimitMethod {
    pub fn default_slope(&self) -> f64 {
        match *self {
            LimitMethod::Basic => 0.33,
            LimitMethod::Extended => 0.31,
        }
    }
    pub fn default_intercept(&self) -> f64 {
        match *self {
            LimitMethod::Basic => 18.8,
            LimitMethod::Extended => 17.8,
        }
    }
}

impl fmt::Display for LimitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            LimitMethod::Basic => "basic",
            LimitMethod::Extended => "extended",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LimitMethod {
    type Err = ConfigError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "basic" => Ok(LimitMethod::Basic),
            "extended" => Ok(LimitMethod::Extended),
            _ => Err(ConfigError(format!(
                "unknown comfort limit method '{}'",
                name
            ))),
        }
    }
}

/// Allowed band widths in °C per comfort class.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Deadbands {
    class_i: f64,
    class_ii: f64,
    class_iii: f64,
}

impl Default for Deadbands {
    fn default() -> Self {
        Deadbands {
            class_i: 2.0,
            class_ii: 3.0,
            class_iii: 4.0,
        }
    }
}

impl Deadbands {
    fn check_width(width: f64) -> Result<(), ConfigError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError(
                "deadband widths should be positive".to_string(),
            ));
        }
        Ok(())
    }
    pub fn try_new(class_i: f64, class_ii: f64, class_iii: f64) -> Result<Self, ConfigError> {
        Self::check_width(class_i)?;
        Self::check_width(class_ii)?;
        Self::check_width(class_iii)?;
        if class_i > class_ii || class_ii > class_iii {
            return Err(ConfigError(
                "deadband widths should widen from class I to class III".to_string(),
            ));
        }
        Ok(Deadbands {
            class_i,
            class_ii,
            class_iii,
        })
    }
    pub fn width_for(&self, class: ComfortClass) -> f64 {
        match class {
            ComfortClass::I => self.class_i,
            ComfortClass::II => self.class_ii,
            ComfortClass::III => self.class_iii,
        }
    }
}

/// Days of week and hour-of-day range during which comfort is evaluated.
///
/// The hour range is start-inclusive, end-exclusive; a start hour greater
/// than the end hour wraps past midnight.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyWindow {
    days: Vec<Weekday>,
    start_hour: u32,
    end_hour: u32,
}

impl OccupancyWindow {
    pub fn try_new(days: Vec<Weekday>, start_hour: u32, end_hour: u32) -> Result<Self, ConfigError> {
        if days.is_empty() {
            return Err(ConfigError(
                "occupancy days should not be empty".to_string(),
            ));
        }
        if start_hour >= 24 {
            return Err(ConfigError(
                "occupancy start hour should be below 24".to_string(),
            ));
        }
        if end_hour > 24 {
            return Err(ConfigError(
                "occupancy end hour should not exceed 24".to_string(),
            ));
        }
        if start_hour == end_hour {
            return Err(ConfigError(
                "occupancy window should not be empty".to_string(),
            ));
        }
        Ok(OccupancyWindow {
            days,
            start_hour,
            end_hour,
        })
    }
    /// Parse a comma-separated list of weekday names, e.g. "mon,tue,wed".
    pub fn parse_days(list: &str) -> Result<Vec<Weekday>, ConfigError> {
        let mut days = Vec::new();
        for name in list.split(',') {
            let day = Weekday::from_str(name.trim())
                .map_err(|_| ConfigError(format!("unknown weekday '{}'", name.trim())))?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(days)
    }
    pub fn days(&self) -> &Vec<Weekday> {
        &self.days
    }
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }
    pub fn contains(&self, time_stamp: TimeStamp) -> bool {
        if !self.days.contains(&time_stamp.weekday()) {
            return false;
        }
        let hour = time_stamp.hour();
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Immutable configuration for a full analysis run.
///
/// Constructed and validated up front; every component receives it
/// explicitly, there are no process-wide defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct ComfortConfig {
    alpha: f64,
    method: LimitMethod,
    comfort_class: ComfortClass,
    slope: Option<f64>,
    intercept: Option<f64>,
    deadbands: Deadbands,
    occupancy: Option<OccupancyWindow>,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        ComfortConfig {
            alpha: 0.8,
            method: LimitMethod::Basic,
            comfort_class: ComfortClass::II,
            slope: None,
            intercept: None,
            deadbands: Deadbands::default(),
            occupancy: None,
        }
    }
}

impl ComfortConfig {
    fn check_alpha(alpha: f64) -> Result<(), ConfigError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ConfigError(
                "alpha should be strictly between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
    fn check_coefficient(name: &str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError(format!("{} should be finite", name)));
        }
        Ok(())
    }
    pub fn try_new(
        alpha: f64,
        method: LimitMethod,
        comfort_class: ComfortClass,
        deadbands: Deadbands,
    ) -> Result<Self, ConfigError> {
        Self::check_alpha(alpha)?;
        Ok(ComfortConfig {
            alpha,
            method,
            comfort_class,
            slope: None,
            intercept: None,
            deadbands,
            occupancy: None,
        })
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), ConfigError> {
        Self::check_alpha(alpha)?;
        self.alpha = alpha;
        Ok(())
    }
    pub fn method(&self) -> LimitMethod {
        self.method
    }
    pub fn set_method(&mut self, method: LimitMethod) {
        self.method = method;
    }
    pub fn comfort_class(&self) -> ComfortClass {
        self.comfort_class
    }
    pub fn set_comfort_class(&mut self, comfort_class: ComfortClass) {
        self.comfort_class = comfort_class;
    }
    /// Slope of the comfort temperature regression; the explicit override if
    /// set, otherwise the method default.
    pub fn slope(&self) -> f64 {
        self.slope.unwrap_or_else(|| self.method.default_slope())
    }
    pub fn set_slope(&mut self, slope: Option<f64>) -> Result<(), ConfigError> {
        if let Some(value) = slope {
            Self::check_coefficient("slope", value)?;
        }
        self.slope = slope;
        Ok(())
    }
    pub fn intercept(&self) -> f64 {
        self.intercept
            .unwrap_or_else(|| self.method.default_intercept())
    }
    pub fn set_intercept(&mut self, intercept: Option<f64>) -> Result<(), ConfigError> {
        if let Some(value) = intercept {
            Self::check_coefficient("intercept", value)?;
        }
        self.intercept = intercept;
        Ok(())
    }
    pub fn deadbands(&self) -> &Deadbands {
        &self.deadbands
    }
    pub fn set_deadbands(&mut self, deadbands: Deadbands) {
        self.deadbands = deadbands;
    }
    /// Band width in °C for the selected comfort class.
    pub fn deadband(&self) -> f64 {
        self.deadbands.width_for(self.comfort_class)
    }
    pub fn occupancy(&self) -> &Option<OccupancyWindow> {
        &self.occupancy
    }
    pub fn set_occupancy(&mut self, occupancy: Option<OccupancyWindow>) {
        self.occupancy = occupancy;
    }
}
