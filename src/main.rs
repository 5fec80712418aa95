use anyhow::Result;
use atg_comfort::analysis;
use atg_comfort::config::{ComfortConfig, Deadbands, OccupancyWindow};
use atg_comfort::errors::ConfigError;
use atg_comfort::ingest;
use atg_comfort::record::ColumnMapping;
use atg_comfort::report;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atg-comfort")]
#[command(about = "Adaptive thermal comfort analysis from hourly CSV data", long_about = None)]
struct Cli {
    /// Path to the input CSV file
    csv: PathBuf,
    /// Timestamp column name
    #[arg(long, default_value = "timestamp")]
    timestamp_col: String,
    /// Operative/indoor temperature column name
    #[arg(long, default_value = "t_op")]
    indoor_col: String,
    /// Outdoor temperature column name
    #[arg(long, default_value = "t_out")]
    outdoor_col: String,
    /// Zone column name; omit for whole-building data
    #[arg(long)]
    zone_col: Option<String>,
    /// Running mean smoothing factor
    #[arg(long, default_value_t = 0.8)]
    alpha: f64,
    /// Comfort limit method: basic or extended
    #[arg(long, default_value = "basic")]
    method: String,
    /// Comfort class: I, II or III
    #[arg(long, default_value = "II")]
    comfort_class: String,
    /// Override the comfort regression slope
    #[arg(long)]
    slope: Option<f64>,
    /// Override the comfort regression intercept
    #[arg(long)]
    intercept: Option<f64>,
    /// Occupied days as a comma-separated list, e.g. "mon,tue,wed,thu,fri"
    #[arg(long)]
    occupancy_days: Option<String>,
    /// First occupied hour of day, inclusive
    #[arg(long, default_value_t = 0)]
    occupancy_start: u32,
    /// First unoccupied hour of day, exclusive
    #[arg(long, default_value_t = 24)]
    occupancy_end: u32,
    /// Output folder
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
}

fn build_config(cli: &Cli) -> Result<ComfortConfig, ConfigError> {
    let mut config = ComfortConfig::try_new(
        cli.alpha,
        cli.method.parse()?,
        cli.comfort_class.parse()?,
        Deadbands::default(),
    )?;
    config.set_slope(cli.slope)?;
    config.set_intercept(cli.intercept)?;
    if let Some(ref day_list) = cli.occupancy_days {
        let days = OccupancyWindow::parse_days(day_list)?;
        config.set_occupancy(Some(OccupancyWindow::try_new(
            days,
            cli.occupancy_start,
            cli.occupancy_end,
        )?));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let input = ingest::read_rows(&cli.csv)?;
    let requested = ColumnMapping {
        timestamp: cli.timestamp_col.clone(),
        indoor: cli.indoor_col.clone(),
        outdoor: cli.outdoor_col.clone(),
        zone: cli.zone_col.clone(),
    };
    let mapping = ingest::resolve_columns(&input.headers, &requested)?;
    let row_analysis = analysis::run_from_rows(&input.rows, &mapping, &config)?;
    for skip in &row_analysis.skipped {
        eprintln!("Skipping {}", skip.reason);
    }
    fs::create_dir_all(&cli.output_dir)?;
    let hourly_path = cli.output_dir.join(report::HOURLY_RESULTS_FILE);
    let monthly_path = cli.output_dir.join(report::MONTHLY_SUMMARY_FILE);
    report::write_hourly_results(&hourly_path, &row_analysis.results.hours)?;
    report::write_monthly_summary(&monthly_path, &row_analysis.results.monthly)?;
    print!(
        "{}",
        report::render_summary(&row_analysis.results, &row_analysis.skipped)
    );
    println!("Outputs written to: {}", cli.output_dir.display());
    Ok(())
}
