use crate::classify::{ClassifiedHour, ComfortState};
use crate::config::OccupancyWindow;
use chrono::Datelike;
use indexmap::IndexMap;
use serde::Serialize;

/// Comfort KPIs for one calendar month, optionally per zone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub zone: Option<String>,
    pub comfortable_hours: usize,
    pub too_warm_hours: usize,
    pub too_cold_hours: usize,
    pub total_hours: usize,
    pub comfort_percentage: f64,
}

#[derive(Clone, Copy, Default)]
struct StateCounts {
    comfortable: usize,
    too_warm: usize,
    too_cold: usize,
}

impl StateCounts {
    fn add(&mut self, state: ComfortState) {
        match state {
            ComfortState::Comfortable => self.comfortable += 1,
            ComfortState::TooWarm => self.too_warm += 1,
            ComfortState::TooCold => self.too_cold += 1,
        }
    }
    fn total(&self) -> usize {
        self.comfortable + self.too_warm + self.too_cold
    }
}

/// Share of comfortable hours in percent; 0 when nothing was considered.
pub fn comfort_percentage(comfortable: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * comfortable as f64 / total as f64
    }
}

/// Groups classified hours into monthly (and per-zone) summaries.
///
/// When an occupancy window is set, hours outside it are left out of both
/// the counts and the totals.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyAggregator {
    occupancy: Option<OccupancyWindow>,
}

impl MonthlyAggregator {
    pub fn new(occupancy: Option<OccupancyWindow>) -> Self {
        MonthlyAggregator { occupancy }
    }
    pub fn occupancy(&self) -> &Option<OccupancyWindow> {
        &self.occupancy
    }
    /// Summarize hours that are expected in chronological order, so months
    /// come out chronologically. Zones keep the order they first appear in
    /// the input, deliberately unsorted.
    pub fn summarize(&self, hours: &[ClassifiedHour]) -> Vec<MonthlySummary> {
        let mut zone_order: Vec<Option<String>> = Vec::new();
        let mut groups: IndexMap<(i32, u32), IndexMap<Option<String>, StateCounts>> =
            IndexMap::new();
        for hour in hours {
            if let Some(ref window) = self.occupancy {
                if !window.contains(hour.timestamp) {
                    continue;
                }
            }
            if !zone_order.contains(&hour.zone) {
                zone_order.push(hour.zone.clone());
            }
            let month_key = (hour.timestamp.year(), hour.timestamp.month());
            groups
                .entry(month_key)
                .or_insert_with(IndexMap::new)
                .entry(hour.zone.clone())
                .or_insert_with(StateCounts::default)
                .add(hour.state);
        }
        let mut summaries = Vec::new();
        for ((year, month), zones) in &groups {
            for zone in &zone_order {
                if let Some(counts) = zones.get(zone) {
                    summaries.push(MonthlySummary {
                        year: *year,
                        month: *month,
                        zone: zone.clone(),
                        comfortable_hours: counts.comfortable,
                        too_warm_hours: counts.too_warm,
                        too_cold_hours: counts.too_cold,
                        total_hours: counts.total(),
                        comfort_percentage: comfort_percentage(counts.comfortable, counts.total()),
                    });
                }
            }
        }
        summaries
    }
}
