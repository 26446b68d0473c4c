//! CSV Data Loader Module
//! Reads the launch records file into a `Dataset` using Polars.

use crate::data::{Dataset, MissionRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Location of the launch records, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "space_missions.csv";

/// Columns every launch file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Company", "Date", "Mission", "MissionStatus", "Rocket"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Loads launch records from a fixed CSV path.
#[derive(Debug, Clone)]
pub struct DataLoader {
    file_path: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the dataset, substituting an empty one on any failure.
    pub fn load(&self) -> Dataset {
        match self.load_csv() {
            Ok(dataset) => dataset,
            Err(LoaderError::NotFound(path)) => {
                warn!(
                    "{} not found, continuing with an empty dataset",
                    path.display()
                );
                Dataset::default()
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "could not read {}, continuing with an empty dataset",
                    self.file_path.display()
                );
                Dataset::default()
            }
        }
    }

    /// Load the dataset, reporting why it could not be read.
    pub fn load_csv(&self) -> Result<Dataset, LoaderError> {
        if !self.file_path.is_file() {
            return Err(LoaderError::NotFound(self.file_path.clone()));
        }

        let path = self.file_path.to_string_lossy().to_string();

        // Schema inference length 0 reads every column as text; dates are
        // coerced per query.
        let df = LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|name| df.column(name).is_err())
        {
            return Err(LoaderError::MissingColumn(missing));
        }

        let company = Self::text_column(&df, "Company")?;
        let date = Self::text_column(&df, "Date")?;
        let mission = Self::text_column(&df, "Mission")?;
        let status = Self::text_column(&df, "MissionStatus")?;
        let rocket = Self::text_column(&df, "Rocket")?;

        let records: Vec<MissionRecord> = company
            .into_iter()
            .zip(date)
            .zip(mission)
            .zip(status)
            .zip(rocket)
            .map(|((((company, date), mission), mission_status), rocket)| MissionRecord {
                company,
                date,
                mission,
                mission_status,
                rocket,
            })
            .collect();

        info!("Loaded {} missions from {}", records.len(), path);
        Ok(Dataset::new(records))
    }

    /// Extract a text column. Nulls (empty cells) become empty strings.
    fn text_column(df: &DataFrame, name: &'static str) -> Result<Vec<String>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name))?;
        let values = column.as_materialized_series().str()?;

        Ok(values
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }
}
