use crate::config::ComfortConfig;
use crate::errors::ConfigError;
use crate::record::HourlyRecord;
use chrono::NaiveDate;
use indexmap::IndexMap;

/// Mean outdoor temperature of one calendar day.
pub type DailyMean = (NaiveDate, f64);

/// Running-mean outdoor temperature per calendar day, chronological, one
/// entry per day present in the input.
pub type RunningMeanSeries = Vec<(NaiveDate, f64)>;

/// Derive per-calendar-day mean outdoor temperatures from hourly records.
///
/// Records are expected in chronological order; the result preserves that
/// order with one entry per day that actually occurs in the input. Missing
/// calendar days are simply absent.
pub fn daily_means(records: &[HourlyRecord]) -> Vec<DailyMean> {
    let mut sums: IndexMap<NaiveDate, (f64, usize)> = IndexMap::new();
    for record in records {
        let entry = sums.entry(record.timestamp.date()).or_insert((0.0, 0));
        entry.0 += record.outdoor_temperature;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(day, (sum, count))| (day, sum / count as f64))
        .collect()
}

/// Exponentially weighted running mean of daily outdoor temperature:
///
/// `Trm[n] = alpha * Trm[n-1] + (1 - alpha) * Tday[n-1]`
///
/// The first day has no history; its running mean is the seed value, which
/// defaults to the first day's own mean. That default is a pragmatic
/// approximation for datasets without lead-in days, not a standard-mandated
/// choice.
#[derive(Clone, Debug, PartialEq)]
pub struct RunningMeanFilter {
    alpha: f64,
    seed: Option<f64>,
}

impl RunningMeanFilter {
    fn check_alpha(alpha: f64) -> Result<(), ConfigError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ConfigError(
                "alpha should be strictly between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
    pub fn try_new(alpha: f64) -> Result<Self, ConfigError> {
        Self::check_alpha(alpha)?;
        Ok(RunningMeanFilter { alpha, seed: None })
    }
    /// Build the filter from an already validated configuration.
    pub fn from_config(config: &ComfortConfig) -> Self {
        RunningMeanFilter {
            alpha: config.alpha(),
            seed: None,
        }
    }
    /// Use an explicit running mean for the first day instead of that day's
    /// own mean.
    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    /// Apply the filter over the daily means, yielding a series aligned 1:1
    /// with the input days. Each entry depends only on earlier days.
    pub fn series(&self, daily: &[DailyMean]) -> RunningMeanSeries {
        let mut series = Vec::with_capacity(daily.len());
        let mut running_mean = 0.0;
        let mut previous_day_mean: Option<f64> = None;
        for (day, mean) in daily {
            running_mean = match previous_day_mean {
                None => self.seed.unwrap_or(*mean),
                Some(previous) => self.alpha * running_mean + (1.0 - self.alpha) * previous,
            };
            series.push((*day, running_mean));
            previous_day_mean = Some(*mean);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeStamp;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("test date should be valid")
    }

    fn record(d: u32, hour: u32, outdoor: f64) -> HourlyRecord {
        let timestamp: TimeStamp = day(d)
            .and_hms_opt(hour, 0, 0)
            .expect("test time should be valid");
        HourlyRecord {
            timestamp,
            indoor_temperature: 21.0,
            outdoor_temperature: outdoor,
            zone: None,
        }
    }

    #[test]
    fn rejects_alpha_outside_open_unit_interval() {
        for alpha in [0.0, 1.0, -1.0, f64::INFINITY] {
            if RunningMeanFilter::try_new(alpha).is_ok() {
                panic!("alpha {} should have been rejected", alpha);
            }
        }
    }
    #[test]
    fn daily_means_average_each_day_separately() {
        let records = vec![
            record(1, 0, 10.0),
            record(1, 12, 14.0),
            record(2, 0, 0.0),
            record(2, 12, 4.0),
        ];
        assert_eq!(daily_means(&records), vec![(day(1), 12.0), (day(2), 2.0)]);
    }
    #[test]
    fn single_day_yields_its_own_mean() {
        let filter = RunningMeanFilter::try_new(0.8).expect("valid alpha should be accepted");
        assert_eq!(filter.series(&[(day(1), 7.5)]), vec![(day(1), 7.5)]);
    }
    #[test]
    fn explicit_seed_replaces_first_day_mean() {
        let filter = RunningMeanFilter::try_new(0.8)
            .expect("valid alpha should be accepted")
            .with_seed(12.0);
        let series = filter.series(&[(day(1), 7.5)]);
        assert_eq!(series, vec![(day(1), 12.0)]);
    }
    #[test]
    fn constant_input_stays_exactly_constant() {
        let filter = RunningMeanFilter::try_new(0.8).expect("valid alpha should be accepted");
        let daily: Vec<DailyMean> = (1..=10).map(|d| (day(d), 10.0)).collect();
        let series = filter.series(&daily);
        assert_eq!(series.len(), 10);
        for (_, value) in series {
            assert_eq!(value, 10.0);
        }
    }
    #[test]
    fn converges_towards_constant_input() {
        let filter = RunningMeanFilter::try_new(0.5).expect("valid alpha should be accepted");
        let mut daily: Vec<DailyMean> = vec![(day(1), 0.0)];
        daily.extend((2..=20).map(|d| (day(d), 10.0)));
        let series = filter.series(&daily);
        let last = series.last().expect("series should not be empty").1;
        assert!((last - 10.0).abs() < 1e-3);
    }
    #[test]
    fn uses_previous_day_mean_not_current() {
        let filter = RunningMeanFilter::try_new(0.8).expect("valid alpha should be accepted");
        let series = filter.series(&[(day(1), 10.0), (day(2), 20.0)]);
        // Day 2 sees only day 1's mean: 0.8 * 10 + 0.2 * 10.
        assert_eq!(series[1].1, 10.0);
    }
    #[test]
    fn advances_over_missing_calendar_days_without_filling() {
        let filter = RunningMeanFilter::try_new(0.8).expect("valid alpha should be accepted");
        let with_gap = filter.series(&[(day(1), 10.0), (day(5), 20.0), (day(6), 20.0)]);
        let contiguous = filter.series(&[(day(1), 10.0), (day(2), 20.0), (day(3), 20.0)]);
        for (entry, expected) in with_gap.iter().zip(contiguous.iter()) {
            assert_eq!(entry.1, expected.1);
        }
    }
}
