//! Sensor and monitor processes connected by a real FIFO

use crate::common::*;
use sensorpipe::transport::ensure_fifo;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn test_readings_reach_both_sink_files() {
    let ws = Workspace::new();
    let config = ws.config("");
    let data = ws.measurements("temperature.txt", &TEMPERATURES);
    let pipe = ws.path("sensor.pipe");
    ensure_fifo(&pipe).unwrap();

    let monitor = monitor_command(&config)
        .args(["-b", "2", "--disconnect-grace", "0"])
        .arg("-t")
        .arg(ws.path("temp.out"))
        .arg("-h")
        .arg(ws.path("ph.out"))
        .arg("-p")
        .arg(&pipe)
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    // wait_with_output blocks, so run it where a timeout can be applied
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(monitor.wait_with_output());
    });

    let mut sensor = sensor_command(&config)
        .args(["-s", "1", "-t", "0", "-f"])
        .arg(&data)
        .arg("-p")
        .arg(&pipe)
        .spawn()
        .unwrap();

    let sensor_status = wait_with_timeout(&mut sensor, PROCESS_TIMEOUT).expect("sensor hung");
    assert!(sensor_status.success());

    let output = rx
        .recv_timeout(PROCESS_TIMEOUT)
        .expect("monitor hung")
        .unwrap();
    assert!(output.status.success());

    assert_eq!(ws.read("temp.out"), prefixed("Temp:", &TEMPERATURES));
    assert_eq!(ws.read("ph.out"), prefixed("pH:", &TEMPERATURES));
    assert_eq!(String::from_utf8_lossy(&output.stdout), prefixed("", &TEMPERATURES));
}

#[test]
fn test_monitor_exits_on_shutdown_signal() {
    let ws = Workspace::new();
    let config = ws.config("");

    let mut monitor = monitor_command(&config)
        .arg("-t")
        .arg(ws.path("temp.out"))
        .arg("-h")
        .arg(ws.path("ph.out"))
        .arg("-p")
        .arg(ws.path("sensor.pipe"))
        .spawn()
        .unwrap();

    // No sensor ever connects; give the monitor time to install its handlers
    thread::sleep(Duration::from_millis(1500));
    assert!(ws.path("sensor.pipe").exists());

    let pid = monitor.id() as libc::pid_t;
    // SAFETY: pid belongs to a child we spawned and have not reaped
    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }

    let status = wait_with_timeout(&mut monitor, PROCESS_TIMEOUT).expect("monitor hung");
    assert_eq!(status.code(), Some(130));
}
