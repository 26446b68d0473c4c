//! Data module - CSV loading and the launch record model

mod loader;
mod record;

pub use loader::{DataLoader, LoaderError, DEFAULT_DATA_PATH, REQUIRED_COLUMNS};
pub use record::{parse_launch_date, Dataset, MissionRecord, MissionStatus};
