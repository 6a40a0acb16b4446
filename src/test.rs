//! Shared test utilities for creating test environments and fixtures.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::help::HelpSource;
use crate::model::{Day, Record, Records};
use crate::scheduler::Renderer;
use crate::view::View;
use crate::Config;
use crate::Result;
use anyhow::anyhow;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Test environment that sets up a paylog home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized home directory.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("paylog");
        let config = Config::create(&root).await.unwrap();
        Self { temp_dir, config }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes `contents` to a file in the temporary directory (outside of the home directory)
    /// and returns its path.
    pub fn write_file(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

pub fn day(s: &str) -> Day {
    Day::from_str(s).unwrap()
}

pub fn record(d: &str, channel: &str, yen: i64) -> Record {
    Record::new(day(d), channel, yen)
}

/// Six purchases, newest first the way the history page lists them.
pub fn sample_records() -> Records {
    Records::new(vec![
        record("2024/03/02", "Alpha", 500),
        record("2024/03/02", "Beta", 300),
        record("2024/03/01", "Alpha", 1200),
        record("2024/02/29", "Beta", 800),
        record("2024/02/29", "Gamma", 100),
        record("2023/12/31", "Alpha", 250),
    ])
}

/// `sample_records` as the JSON a user would paste.
pub fn sample_json() -> String {
    serde_json::to_string_pretty(&sample_records()).unwrap()
}

/// A renderer that keeps every view it is given.
#[derive(Clone, Default)]
pub struct Recorder {
    views: Arc<Mutex<Vec<View>>>,
}

impl Recorder {
    pub fn views(&self) -> Vec<View> {
        self.views.lock().unwrap().clone()
    }
}

impl Renderer for Recorder {
    fn render(&mut self, view: &View) -> Result<()> {
        self.views.lock().unwrap().push(view.clone());
        Ok(())
    }
}

/// A `HelpSource` that counts how often it is fetched.
#[derive(Clone)]
pub struct CountingHelp {
    text: Option<String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl CountingHelp {
    pub fn ok(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Succeeds after sleeping for `delay`.
    pub fn slow(text: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok(text)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HelpSource for CountingHelp {
    async fn fetch(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.text.clone().ok_or_else(|| anyhow!("unreachable help server"))
    }
}
