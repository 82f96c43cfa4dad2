#![allow(dead_code)]

use anyhow::Result;
use saasflow::config::Config;
use saasflow::fixtures::Fixtures;
use saasflow::format::parse_timestamp;
use std::path::PathBuf;
use tempfile::TempDir;

/// Instant the fixture timestamps are read against
pub const FIXTURE_NOW: &str = "2026-02-22T12:00:00Z";

/// Config pinned to the fixture clock
pub fn pinned_config() -> Config {
    Config {
        reference_time: Some(parse_timestamp(FIXTURE_NOW).unwrap()),
        ..Config::default()
    }
}

pub fn builtin() -> &'static Fixtures {
    Fixtures::builtin().expect("builtin dataset parses")
}

/// Temporary directory holding config and dataset files
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// The builtin dataset with `edit` applied, written as JSON
    pub fn write_dataset<F>(&self, edit: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut Fixtures),
    {
        let mut data = builtin().clone();
        edit(&mut data);
        self.write("dataset.json", &serde_json::to_string_pretty(&data)?)
    }
}
