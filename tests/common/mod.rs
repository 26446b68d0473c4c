use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tempfile::TempDir;

/// One launch row: company, location, date, time, rocket, mission, status.
pub type Launch = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

fn column(rows: &[Launch], pick: fn(&Launch) -> &'static str) -> Vec<&'static str> {
    rows.iter().map(pick).collect()
}

/// Write `rows` as a launch CSV inside a fresh temp dir. Keep the TempDir
/// alive for as long as the file is used.
pub fn write_csv(rows: &[Launch]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("space_missions.csv");

    let mut df = df!(
        "Company" => column(rows, |r| r.0),
        "Location" => column(rows, |r| r.1),
        "Date" => column(rows, |r| r.2),
        "Time" => column(rows, |r| r.3),
        "Rocket" => column(rows, |r| r.4),
        "Mission" => column(rows, |r| r.5),
        "RocketStatus" => vec!["Retired"; rows.len()],
        "Price" => vec![""; rows.len()],
        "MissionStatus" => column(rows, |r| r.6)
    )
    .unwrap();
    let mut file = File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df).unwrap();

    (dir, path)
}

/// A small slice of launch history with a few awkward rows.
pub fn launch_history() -> Vec<Launch> {
    vec![
        ("RVSN USSR", "Site 1/5, Baikonur Cosmodrome, Kazakhstan", "1957-10-04", "19:28:00", "Sputnik 8K71PS", "Sputnik-1", "Success"),
        ("RVSN USSR", "Site 1/5, Baikonur Cosmodrome, Kazakhstan", "1957-11-03", "02:30:00", "Sputnik 8K71PS", "Sputnik-2", "Success"),
        ("US Navy", "LC-18A, Cape Canaveral AFS, Florida, USA", "1957-12-06", "16:44:00", "Vanguard", "Vanguard TV3", "Failure"),
        ("AMBA", "LC-26A, Cape Canaveral AFS, Florida, USA", "1958-02-01", "03:48:00", "Juno I", "Explorer 1", "Success"),
        ("US Navy", "LC-18A, Cape Canaveral AFS, Florida, USA", "1958-02-05", "07:33:00", "Vanguard", "Vanguard TV3BU", "Failure"),
        ("AMBA", "LC-26A, Cape Canaveral AFS, Florida, USA", "1958-03-05", "18:27:00", "Juno I", "Explorer 2", "Failure"),
        ("US Navy", "LC-18A, Cape Canaveral AFS, Florida, USA", "1958-03-17", "12:15:00", "Vanguard", "Vanguard 1", "Success"),
        ("AMBA", "LC-5, Cape Canaveral AFS, Florida, USA", "not recorded", "", "Juno I", "Explorer 3", "Partial Failure"),
        ("US Air Force", "SLC-17A, Cape Canaveral AFS, Florida, USA", "1958-08-17", "12:18:00", "Thor-Able I", "Pioneer 0", "Scrubbed"),
        ("NASA", "LC-5, Cape Canaveral AFS, Florida, USA", "1958-03-17", "00:00:00", "Juno I", "Same Day", "Prelaunch Failure"),
    ]
}
