//! Space Missions Dashboard - launch record statistics & chart export
//!
//! Loads a CSV of launch records and answers aggregate queries over it:
//! per-company counts and success rates, date and year filters, rankings,
//! status tallies, and the series behind the dashboard charts.

pub mod charts;
pub mod cli;
pub mod data;
pub mod stats;

pub use data::{DataLoader, Dataset, MissionRecord, MissionStatus};
pub use stats::{MissionStats, QueryOutcome, QueryWarning, WarningKind};
