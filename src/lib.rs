pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod comfort;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod record;
pub mod report;
pub mod running_mean;

use chrono::NaiveDateTime;

pub type TimeStamp = NaiveDateTime;
