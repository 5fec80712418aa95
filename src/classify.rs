use crate::comfort::ComfortBand;
use crate::record::HourlyRecord;
use crate::TimeStamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comfort classification of a single hour.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortState {
    Comfortable,
    TooWarm,
    TooCold,
}

impl ComfortState {
    pub fn label(&self) -> &'static str {
        match *self {
            ComfortState::Comfortable => "comfortable",
            ComfortState::TooWarm => "too_warm",
            ComfortState::TooCold => "too_cold",
        }
    }
}

impl fmt::Display for ComfortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An hourly record together with the comfort band it was judged against
/// and the resulting classification. Flat so it serializes straight into
/// the hourly results file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassifiedHour {
    pub timestamp: TimeStamp,
    pub zone: Option<String>,
    pub indoor_temperature: f64,
    pub outdoor_temperature: f64,
    pub running_mean_outdoor: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub state: ComfortState,
}

/// Classify an indoor temperature against the day's comfort band.
///
/// The band is a closed interval: temperatures exactly on a limit count as
/// comfortable.
pub fn classify(indoor_temperature: f64, band: &ComfortBand) -> ComfortState {
    if indoor_temperature < band.lower {
        ComfortState::TooCold
    } else if indoor_temperature > band.upper {
        ComfortState::TooWarm
    } else {
        ComfortState::Comfortable
    }
}

/// Attach band, running mean and classification to a validated record.
pub fn classify_hour(
    record: &HourlyRecord,
    running_mean: f64,
    band: &ComfortBand,
) -> ClassifiedHour {
    ClassifiedHour {
        timestamp: record.timestamp,
        zone: record.zone.clone(),
        indoor_temperature: record.indoor_temperature,
        outdoor_temperature: record.outdoor_temperature,
        running_mean_outdoor: running_mean,
        lower_limit: band.lower,
        upper_limit: band.upper,
        state: classify(record.indoor_temperature, band),
    }
}
