//! Stats module - launch queries, chart series and reports

mod outcome;
mod queries;
mod report;
pub mod series;

pub use outcome::{QueryOutcome, QueryWarning, WarningKind};
pub use queries::{round_to, MissionStats, StatusCounts, FIRST_LAUNCH_YEAR, RATE_PRECISION};
pub use report::{CompanyRow, Report};
pub use series::{CompanyOutcome, SeriesFilter, YearRate};
