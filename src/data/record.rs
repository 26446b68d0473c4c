//! Mission Record Module
//! Row type, canonical statuses and the in-memory dataset.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Parse free-text launch dates. Anything unrecognised is `None`.
///
/// Accepts RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]` (or with `T`), `YYYY/MM/DD`,
/// `MM/DD/YYYY`, `D Month YYYY`, `Month D, YYYY` (full or abbreviated month),
/// `YYYY-MM` and `YYYY`. Each cell is parsed on its own, so one file may mix
/// formats; nothing is inferred from the first row.
///
/// Date-only inputs resolve to midnight so they compare naturally against
/// timestamped bounds.
pub fn parse_launch_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Year-month ("1957-10") and bare years ("1957") start at the first day
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
    }

    None
}

/// The four outcome categories recognised by status counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MissionStatus {
    Success,
    Failure,
    #[serde(rename = "Partial Failure")]
    PartialFailure,
    #[serde(rename = "Prelaunch Failure")]
    PrelaunchFailure,
}

impl MissionStatus {
    /// Canonical statuses in reporting order.
    pub const ALL: [MissionStatus; 4] = [
        MissionStatus::Success,
        MissionStatus::Failure,
        MissionStatus::PartialFailure,
        MissionStatus::PrelaunchFailure,
    ];

    /// Exact, case-sensitive match against the canonical spellings.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Success => "Success",
            MissionStatus::Failure => "Failure",
            MissionStatus::PartialFailure => "Partial Failure",
            MissionStatus::PrelaunchFailure => "Prelaunch Failure",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row of the launch dataset. Fields are kept as read; dates are
/// parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MissionRecord {
    pub company: String,
    pub date: String,
    pub mission: String,
    pub mission_status: String,
    pub rocket: String,
}

impl MissionRecord {
    pub fn new(
        company: impl Into<String>,
        date: impl Into<String>,
        mission: impl Into<String>,
        mission_status: impl Into<String>,
        rocket: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            date: date.into(),
            mission: mission.into(),
            mission_status: mission_status.into(),
            rocket: rocket.into(),
        }
    }

    pub fn launch_date(&self) -> Option<NaiveDateTime> {
        parse_launch_date(&self.date)
    }

    pub fn launch_year(&self) -> Option<i32> {
        self.launch_date().map(|dt| dt.year())
    }

    /// `None` for non-canonical or empty statuses.
    pub fn status(&self) -> Option<MissionStatus> {
        MissionStatus::parse(&self.mission_status)
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some(MissionStatus::Success)
    }
}

/// Ordered, read-only collection of mission records in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    records: Vec<MissionRecord>,
}

impl Dataset {
    pub fn new(records: Vec<MissionRecord>) -> Self {
        Self { records }
    }

    /// Full record set, for table views.
    pub fn records(&self) -> &[MissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct company names, sorted, for selection widgets.
    pub fn companies(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.company.is_empty())
            .map(|r| r.company.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Earliest and latest launch year among parseable dates.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.records
            .iter()
            .filter_map(MissionRecord::launch_year)
            .fold(None, |bounds, year| match bounds {
                None => Some((year, year)),
                Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
            })
    }

    /// Records whose company matches exactly. Empty company cells never match.
    pub fn by_company<'a>(&'a self, company: &'a str) -> impl Iterator<Item = &'a MissionRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| !r.company.is_empty() && r.company == company)
    }
}

impl FromIterator<MissionRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = MissionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn parses_common_date_shapes() {
        assert_eq!(parse_launch_date("1957-10-04"), Some(at_midnight(1957, 10, 4)));
        assert_eq!(parse_launch_date("10/04/1957"), Some(at_midnight(1957, 10, 4)));
        assert_eq!(parse_launch_date("4 October 1957"), Some(at_midnight(1957, 10, 4)));
        assert_eq!(parse_launch_date("1957"), Some(at_midnight(1957, 1, 1)));
        assert_eq!(parse_launch_date("1957-10"), Some(at_midnight(1957, 10, 1)));
        assert_eq!(
            parse_launch_date("1957-10-04 19:28:00").map(|dt| dt.year()),
            Some(1957)
        );
    }

    #[test]
    fn garbage_dates_are_missing() {
        assert_eq!(parse_launch_date(""), None);
        assert_eq!(parse_launch_date("   "), None);
        assert_eq!(parse_launch_date("NASA"), None);
        assert_eq!(parse_launch_date("1957-13-45"), None);
    }

    #[test]
    fn status_parse_is_exact() {
        assert_eq!(MissionStatus::parse("Success"), Some(MissionStatus::Success));
        assert_eq!(
            MissionStatus::parse("Prelaunch Failure"),
            Some(MissionStatus::PrelaunchFailure)
        );
        assert_eq!(MissionStatus::parse("success"), None);
        assert_eq!(MissionStatus::parse("Scrubbed"), None);
    }

    #[test]
    fn accessors_for_dashboard() {
        let data: Dataset = vec![
            MissionRecord::new("SpaceX", "2020-05-30", "Demo-2", "Success", "Falcon 9"),
            MissionRecord::new("NASA", "1969-07-16", "Apollo 11", "Success", "Saturn V"),
            MissionRecord::new("SpaceX", "not a date", "Mystery", "Failure", "Falcon 1"),
            MissionRecord::new("", "1990-01-01", "Orphan", "Success", "Unknown"),
        ]
        .into_iter()
        .collect();

        assert_eq!(data.len(), 4);
        assert_eq!(data.companies(), vec!["NASA".to_string(), "SpaceX".to_string()]);
        assert_eq!(data.year_bounds(), Some((1969, 2020)));
        assert_eq!(data.by_company("SpaceX").count(), 2);
        assert_eq!(data.by_company("").count(), 0);
        assert_eq!(data.records()[1].mission, "Apollo 11");
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let data = Dataset::default();
        assert!(data.is_empty());
        assert!(data.companies().is_empty());
        assert_eq!(data.year_bounds(), None);
    }
}
