use crate::aggregate::{comfort_percentage, MonthlySummary};
use crate::analysis::AnalysisResults;
use crate::classify::{ClassifiedHour, ComfortState};
use crate::errors::ReportError;
use crate::record::SkippedRow;
use indexmap::IndexMap;
use std::path::Path;

pub const HOURLY_RESULTS_FILE: &str = "comfort_hourly_results.csv";
pub const MONTHLY_SUMMARY_FILE: &str = "comfort_monthly_summary.csv";

/// Write the per-hour classification results as CSV.
pub fn write_hourly_results(path: &Path, hours: &[ClassifiedHour]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for hour in hours {
        writer.serialize(hour)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the monthly KPI summaries as CSV.
pub fn write_monthly_summary(
    path: &Path,
    summaries: &[MonthlySummary],
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the console summary: overall comfort KPIs plus skip counts per
/// reason, so data-quality problems stay visible next to the result.
pub fn render_summary(results: &AnalysisResults, skipped: &[SkippedRow]) -> String {
    let total = results.hours.len();
    let comfortable = results
        .hours
        .iter()
        .filter(|hour| hour.state == ComfortState::Comfortable)
        .count();
    let mut text = String::new();
    text.push_str("ATG comfort analysis complete\n");
    text.push_str(&format!("Total hours: {}\n", total));
    text.push_str(&format!("Comfort hours: {}\n", comfortable));
    text.push_str(&format!(
        "Comfort percentage: {:.1}%\n",
        comfort_percentage(comfortable, total)
    ));
    if !skipped.is_empty() {
        text.push_str(&format!("Skipped rows: {}\n", skipped.len()));
        let mut reasons: IndexMap<&'static str, usize> = IndexMap::new();
        for skip in skipped {
            *reasons.entry(skip.reason.kind_label()).or_insert(0) += 1;
        }
        for (reason, count) in reasons {
            text.push_str(&format!("  {}: {}\n", reason, count));
        }
    }
    text
}
