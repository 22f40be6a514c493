//! Common test utilities and helpers
//!
//! Scratch directories with measurement files, isolated configuration and
//! process helpers for the built binaries.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub const TEMPERATURES: [&str; 4] = ["21.5", "21.7", "22.0", "21.9"];

/// Upper bound for any single process in these tests
pub const PROCESS_TIMEOUT: Duration = Duration::from_secs(20);

/// Scratch directory holding every path one sensor/monitor run needs
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `lines` to a measurement file, one per line
    pub fn measurements(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.path(name);
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents).expect("Failed to write measurement file");
        path
    }

    /// Write a configuration file; empty contents keep the user's own config out of the test
    pub fn config(&self, contents: &str) -> PathBuf {
        let path = self.path("sensorpipe.toml");
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap_or_default()
    }
}

pub fn sensor_command(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sensor"));
    cmd.arg("--config-file").arg(config).args(["--log-level", "warn", "--color", "false"]);
    cmd
}

pub fn monitor_command(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_monitor"));
    cmd.arg("--config-file").arg(config).args(["--log-level", "warn", "--color", "false"]);
    cmd
}

/// Poll `child` until it exits; kill it and return `None` after `timeout`
pub fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}

/// Sink file contents expected for `readings` with the given prefix
pub fn prefixed(prefix: &str, readings: &[&str]) -> String {
    readings
        .iter()
        .map(|r| format!("{}{}\n", prefix, r))
        .collect()
}
