//! CLI argument parsing tests
//!
//! Help, version and argument errors as seen by a user of the binaries.

use crate::common::*;
use std::process::Command;

#[test]
fn test_monitor_help_is_long_only() {
    let output = Command::new(env!("CARGO_BIN_EXE_monitor"))
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--ph-file"), "help output: {}", stdout);
    assert!(stdout.contains("--buffer-size"));
    assert!(stdout.contains("-h"));
}

#[test]
fn test_sensor_help_and_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_sensor"))
        .arg("-h")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--sensor-type"));

    let output = Command::new(env!("CARGO_BIN_EXE_sensor"))
        .arg("--version")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_monitor_rejects_zero_buffer_size() {
    let ws = Workspace::new();
    let config = ws.config("");

    let output = monitor_command(&config)
        .args(["-b", "0", "-t", "temp.out", "-h", "ph.out", "-p", "sensor.pipe"])
        .current_dir(ws.dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("greater than 0"), "stderr: {}", stderr);
    assert!(!ws.path("sensor.pipe").exists());
}

#[test]
fn test_sensor_missing_required_arguments() {
    let output = Command::new(env!("CARGO_BIN_EXE_sensor"))
        .args(["-s", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_sensor_missing_measurement_file_fails() {
    let ws = Workspace::new();
    let config = ws.config("");

    let mut child = sensor_command(&config)
        .args(["-t", "0", "-f"])
        .arg(ws.path("absent.txt"))
        .arg("-p")
        .arg(ws.path("sensor.pipe"))
        .spawn()
        .unwrap();

    let status = wait_with_timeout(&mut child, PROCESS_TIMEOUT).expect("sensor did not exit");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_monitor_refuses_regular_file_as_pipe() {
    let ws = Workspace::new();
    let config = ws.config("");
    let not_a_pipe = ws.measurements("readings.txt", &TEMPERATURES);

    let mut child = monitor_command(&config)
        .arg("-t")
        .arg(ws.path("temp.out"))
        .arg("-h")
        .arg(ws.path("ph.out"))
        .arg("-p")
        .arg(&not_a_pipe)
        .spawn()
        .unwrap();

    let status = wait_with_timeout(&mut child, PROCESS_TIMEOUT).expect("monitor did not exit");
    assert_eq!(status.code(), Some(1));
}
