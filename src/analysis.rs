use crate::aggregate::{MonthlyAggregator, MonthlySummary};
use crate::classify::{classify_hour, ClassifiedHour};
use crate::comfort::{ComfortBand, ComfortLimitModel};
use crate::config::ComfortConfig;
use crate::errors::EmptyInputError;
use crate::record::{validate_rows, ColumnMapping, HourlyRecord, RawRow, SkippedRow};
use crate::running_mean::{daily_means, RunningMeanFilter};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// Everything an analysis run produces: the full classified hour sequence
/// and the monthly KPI summaries derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResults {
    pub hours: Vec<ClassifiedHour>,
    pub monthly: Vec<MonthlySummary>,
}

/// Results of running the pipeline from raw rows, including the rows that
/// validation skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct RowAnalysis {
    pub results: AnalysisResults,
    pub skipped: Vec<SkippedRow>,
}

/// Run the comfort analysis over validated records.
///
/// Records must be in chronological order, which [`validate_rows`]
/// guarantees. The whole computation is a single forward pass: daily means,
/// running-mean series, per-day comfort band, per-hour classification,
/// monthly aggregation. Identical input and configuration always produce
/// identical output.
pub fn run(
    records: &[HourlyRecord],
    config: &ComfortConfig,
) -> Result<AnalysisResults, EmptyInputError> {
    if records.is_empty() {
        return Err(EmptyInputError);
    }
    let filter = RunningMeanFilter::from_config(config);
    let model = ComfortLimitModel::from_config(config);
    let day_bands: IndexMap<NaiveDate, (f64, ComfortBand)> = filter
        .series(&daily_means(records))
        .into_iter()
        .map(|(day, running_mean)| (day, (running_mean, model.band(running_mean))))
        .collect();
    let mut hours = Vec::with_capacity(records.len());
    for record in records {
        let (running_mean, band) = day_bands
            .get(&record.timestamp.date())
            .expect("every record day should have a running mean entry");
        hours.push(classify_hour(record, *running_mean, band));
    }
    let monthly = MonthlyAggregator::new(config.occupancy().clone()).summarize(&hours);
    Ok(AnalysisResults { hours, monthly })
}

/// Ingest boundary: validate raw rows against a column mapping, then run
/// the analysis over the surviving records. Skipped rows are reported
/// alongside the results; only a fully empty outcome is an error.
pub fn run_from_rows(
    rows: &[RawRow],
    mapping: &ColumnMapping,
    config: &ComfortConfig,
) -> Result<RowAnalysis, EmptyInputError> {
    let (records, skipped) = validate_rows(rows, mapping);
    let results = run(&records, config)?;
    Ok(RowAnalysis { results, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ComfortState;
    use crate::config::OccupancyWindow;
    use crate::record::RawRow;
    use chrono::{NaiveDate, Weekday};

    fn record(day: u32, hour: u32, indoor: f64, outdoor: f64) -> HourlyRecord {
        HourlyRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 6, day)
                .expect("test date should be valid")
                .and_hms_opt(hour, 0, 0)
                .expect("test time should be valid"),
            indoor_temperature: indoor,
            outdoor_temperature: outdoor,
            zone: None,
        }
    }

    #[test]
    fn empty_input_is_an_explicit_error() {
        if run(&[], &ComfortConfig::default()).is_ok() {
            panic!("empty input should have been rejected");
        }
    }
    #[test]
    fn worked_example_matches_standard_band() {
        // Three days of constant 10 °C outdoors keep the running mean at 10,
        // so the class II band sits at 22.1 ± 1.5.
        let records = vec![
            record(1, 10, 22.0, 10.0),
            record(2, 10, 23.7, 10.0),
            record(3, 10, 20.0, 10.0),
        ];
        let results =
            run(&records, &ComfortConfig::default()).expect("analysis should succeed");
        assert_eq!(results.hours.len(), 3);
        for hour in &results.hours {
            assert_eq!(hour.running_mean_outdoor, 10.0);
            assert!((hour.lower_limit - 20.6).abs() < 1e-9);
            assert!((hour.upper_limit - 23.6).abs() < 1e-9);
        }
        assert_eq!(results.hours[0].state, ComfortState::Comfortable);
        assert_eq!(results.hours[1].state, ComfortState::TooWarm);
        assert_eq!(results.hours[2].state, ComfortState::TooCold);
        // A temperature exactly on the upper limit stays comfortable.
        let mut boundary = records.clone();
        boundary[0].indoor_temperature = results.hours[0].upper_limit;
        let boundary_results =
            run(&boundary, &ComfortConfig::default()).expect("analysis should succeed");
        assert_eq!(boundary_results.hours[0].state, ComfortState::Comfortable);
    }
    #[test]
    fn repeated_runs_are_identical() {
        let records = vec![
            record(1, 8, 21.5, 12.0),
            record(1, 9, 24.9, 12.0),
            record(2, 8, 19.0, 6.0),
            record(2, 9, 22.0, 6.0),
        ];
        let config = ComfortConfig::default();
        let first = run(&records, &config).expect("analysis should succeed");
        let second = run(&records, &config).expect("analysis should succeed");
        assert_eq!(first, second);
    }
    #[test]
    fn monthly_summaries_follow_classification() {
        let records = vec![
            record(1, 8, 22.0, 10.0),
            record(1, 9, 30.0, 10.0),
            record(2, 8, 10.0, 10.0),
        ];
        let results =
            run(&records, &ComfortConfig::default()).expect("analysis should succeed");
        assert_eq!(results.monthly.len(), 1);
        let summary = &results.monthly[0];
        assert_eq!(summary.year, 2024);
        assert_eq!(summary.month, 6);
        assert_eq!(summary.comfortable_hours, 1);
        assert_eq!(summary.too_warm_hours, 1);
        assert_eq!(summary.too_cold_hours, 1);
        assert_eq!(summary.total_hours, 3);
    }
    #[test]
    fn occupancy_window_flows_into_aggregation() {
        let mut config = ComfortConfig::default();
        config.set_occupancy(Some(
            OccupancyWindow::try_new(vec![Weekday::Mon], 8, 18)
                .expect("valid window should be accepted"),
        ));
        // 2024-06-03 is a Monday, 2024-06-04 a Tuesday.
        let records = vec![record(3, 9, 22.0, 10.0), record(4, 9, 22.0, 10.0)];
        let results = run(&records, &config).expect("analysis should succeed");
        // Both hours are classified, only the Monday one is considered.
        assert_eq!(results.hours.len(), 2);
        assert_eq!(results.monthly.len(), 1);
        assert_eq!(results.monthly[0].total_hours, 1);
    }
    fn raw_row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect()
    }
    #[test]
    fn raw_rows_run_end_to_end_with_skips() {
        let rows = vec![
            raw_row(&[("timestamp", "2024-06-01 08:00:00"), ("t_op", "22.0"), ("t_out", "10.0")]),
            raw_row(&[("timestamp", "units"), ("t_op", "°C"), ("t_out", "°C")]),
            raw_row(&[("timestamp", "2024-06-01 09:00:00"), ("t_op", "25.0"), ("t_out", "10.0")]),
        ];
        let analysis = run_from_rows(
            &rows,
            &crate::record::ColumnMapping::default(),
            &ComfortConfig::default(),
        )
        .expect("analysis should succeed");
        assert_eq!(analysis.results.hours.len(), 2);
        assert_eq!(analysis.skipped.len(), 1);
        assert_eq!(analysis.skipped[0].row, 3);
    }
    #[test]
    fn all_rows_skipped_surfaces_empty_input() {
        let rows = vec![raw_row(&[("timestamp", "units"), ("t_op", "°C"), ("t_out", "°C")])];
        if run_from_rows(
            &rows,
            &crate::record::ColumnMapping::default(),
            &ComfortConfig::default(),
        )
        .is_ok()
        {
            panic!("fully skipped input should have been an error");
        }
    }
}
