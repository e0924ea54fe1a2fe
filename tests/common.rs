#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use citytime::config::Settings;
use citytime::core::index::LocationIndex;
use citytime::core::session::Session;

pub fn ct() -> Command {
    cargo_bin_cmd!("citytime")
}

/// Create a unique settings file path inside the system temp dir and remove
/// any existing file
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_citytime.conf", name));
    let config_path = path.to_string_lossy().to_string();
    fs::remove_file(&config_path).ok();
    config_path
}

/// Small dataset covering the cases the library tests need, including one
/// record with a bogus timezone (dropped at load) and one without any.
pub const TEST_DATASET: &str = r#"[
  { "city": "New York", "city_ascii": "New York", "country": "United States", "timezone": "America/New_York" },
  { "city": "London", "city_ascii": "London", "country": "United Kingdom", "timezone": "Europe/London" },
  { "city": "Tokyo", "city_ascii": "Tokyo", "country": "Japan", "timezone": "Asia/Tokyo" },
  { "city": "Paris", "city_ascii": "Paris", "country": "France", "timezone": "Europe/Paris" },
  { "city": "Zürich", "city_ascii": "Zurich", "country": "Switzerland", "timezone": "Europe/Zurich" },
  { "city": "Atlantis", "city_ascii": "Atlantis", "country": "Nowhere", "timezone": "Ocean/Deep" },
  { "city": "Limbo", "city_ascii": "Limbo", "country": "Nowhere" }
]"#;

pub fn test_index() -> Arc<LocationIndex> {
    Arc::new(LocationIndex::from_json(TEST_DATASET).unwrap())
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Session on a mid-winter date with the default New York / London pair and
/// the time field seeded to 09:30.
pub fn winter_session() -> Session {
    Session::with_start(test_index(), Settings::default(), d(2025, 1, 15), t(9, 30))
}
