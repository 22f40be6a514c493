//! Configuration file tests
//!
//! Problems with the configuration file stop either binary before any
//! pipe is touched.

use crate::common::*;

#[test]
fn test_missing_config_file_is_fatal() {
    let ws = Workspace::new();

    let output = monitor_command(&ws.path("nowhere.toml"))
        .arg("-t")
        .arg(ws.path("temp.out"))
        .arg("-h")
        .arg(ws.path("ph.out"))
        .arg("-p")
        .arg(ws.path("sensor.pipe"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
    assert!(!ws.path("sensor.pipe").exists());
}

#[test]
fn test_unknown_config_key_is_fatal() {
    let ws = Workspace::new();
    let config = ws.config("[monitor]\nbuffer = 4\n");

    let output = sensor_command(&config)
        .arg("-f")
        .arg(ws.path("absent.txt"))
        .arg("-p")
        .arg(ws.path("sensor.pipe"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot parse"), "stderr: {}", stderr);
}

#[test]
fn test_zero_buffer_size_in_config_is_fatal() {
    let ws = Workspace::new();
    let config = ws.config("[monitor]\nbuffer_size = 0\n");

    let output = monitor_command(&config)
        .arg("-t")
        .arg(ws.path("temp.out"))
        .arg("-h")
        .arg(ws.path("ph.out"))
        .arg("-p")
        .arg(ws.path("sensor.pipe"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("buffer_size"));
}
