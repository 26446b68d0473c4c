//! Query outcomes: a value plus an optional advisory warning.
//!
//! Queries never fail. Bad arguments and empty results both produce a safe
//! default value and a `QueryWarning`, which is also logged.

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::warn;

/// Broad class of a query warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// Argument has the wrong shape or is out of range.
    InvalidInput,
    /// Argument is valid but nothing matched.
    NoMatchingData,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryWarning {
    #[error("'{0}' is not a valid company name")]
    UnknownCompany(String),
    #[error("start date '{start}' or end date '{end}' is invalid")]
    InvalidDateRange { start: String, end: String },
    #[error("start date '{start}' is after the end date '{end}'")]
    ReversedDateRange { start: String, end: String },
    #[error("n must be a positive integer, got {0}")]
    NonPositiveLimit(i64),
    #[error("year must be a positive integer, got {0}")]
    NegativeYear(i64),
    #[error("the first mission launched in 1957, got {0}")]
    BeforeFirstLaunch(i64),
    #[error("start year {start} is after the end year {end}")]
    ReversedYearRange { start: i64, end: i64 },
    #[error("no rocket data found")]
    NoRocketData,
}

impl QueryWarning {
    pub fn kind(&self) -> WarningKind {
        match self {
            QueryWarning::UnknownCompany(_) | QueryWarning::NoRocketData => {
                WarningKind::NoMatchingData
            }
            QueryWarning::InvalidDateRange { .. }
            | QueryWarning::ReversedDateRange { .. }
            | QueryWarning::NonPositiveLimit(_)
            | QueryWarning::NegativeYear(_)
            | QueryWarning::BeforeFirstLaunch(_)
            | QueryWarning::ReversedYearRange { .. } => WarningKind::InvalidInput,
        }
    }
}

/// Result of a query: always a usable value, sometimes with a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome<T> {
    pub value: T,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "warning_message"
    )]
    pub warning: Option<QueryWarning>,
}

impl<T> QueryOutcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// Default value with a diagnostic. The warning is logged here.
    pub fn warn(value: T, warning: QueryWarning) -> Self {
        warn!("{}", warning);
        Self {
            value,
            warning: Some(warning),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }

    pub fn warning_kind(&self) -> Option<WarningKind> {
        self.warning.as_ref().map(QueryWarning::kind)
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

fn warning_message<S: Serializer>(
    warning: &Option<QueryWarning>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match warning {
        Some(w) => serializer.serialize_str(&w.to_string()),
        None => serializer.serialize_none(),
    }
}
