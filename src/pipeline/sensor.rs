//! Sensor side: measurement file to named pipe
//!
//! Each non-blank line of the measurement file is written to the pipe as
//! one `\n`-terminated reading, optionally paced by a fixed interval.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::transport::PipeWriter;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity of the shutdown check while pacing
const PACING_SLICE: Duration = Duration::from_millis(100);

/// Resolved sensor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSettings {
    /// Label only (1 = temperature, 2 = pH by convention); readings are not classified
    pub sensor_type: u8,
    /// Pause between consecutive readings
    pub interval: Duration,
    pub data_file: PathBuf,
    pub pipe: PathBuf,
}

/// Outcome of one sensor run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorReport {
    pub lines_sent: usize,
    /// Stopped early on a shutdown request
    pub interrupted: bool,
}

/// Open the measurement file and the pipe, then publish every reading
///
/// Opening the pipe blocks until a monitor opens the read end.
pub fn run_sensor(settings: &SensorSettings, shutdown: &AtomicBool) -> PipelineResult<SensorReport> {
    let data = File::open(&settings.data_file).map_err(|e| {
        PipelineError::io(
            format!(
                "Cannot open measurement file {}",
                settings.data_file.display()
            ),
            e,
        )
    })?;

    log::info!(
        "Sensor type {} waiting for monitor on {}",
        settings.sensor_type,
        settings.pipe.display()
    );
    let mut writer = PipeWriter::open(&settings.pipe)?;
    log::info!("Connected to {}", settings.pipe.display());

    let report = publish_readings(BufReader::new(data), &mut writer, settings.interval, shutdown)?;

    if report.interrupted {
        log::warn!(
            "Sensor stopped by shutdown request after {} reading(s)",
            report.lines_sent
        );
    } else {
        log::info!("Sensor finished: {} reading(s) sent", report.lines_sent);
    }
    Ok(report)
}

/// Write each non-blank line of `source` to the pipe
pub fn publish_readings<R: BufRead, W: Write>(
    source: R,
    writer: &mut PipeWriter<W>,
    interval: Duration,
    shutdown: &AtomicBool,
) -> PipelineResult<SensorReport> {
    let mut report = SensorReport::default();

    for line in source.lines() {
        if shutdown.load(Ordering::Acquire) {
            report.interrupted = true;
            break;
        }

        let line = line.map_err(|e| PipelineError::io("Cannot read measurement file", e))?;
        let reading = line.trim_end_matches('\r');
        if reading.trim().is_empty() {
            continue;
        }

        if report.lines_sent > 0 && !pace(interval, shutdown) {
            report.interrupted = true;
            break;
        }

        writer.write_chunk(format!("{}\n", reading).as_bytes())?;
        log::debug!("Sent reading: {}", reading);
        report.lines_sent += 1;
    }

    Ok(report)
}

/// Sleep for `interval`, waking early on shutdown
///
/// Returns `false` if shutdown was requested.
fn pace(interval: Duration, shutdown: &AtomicBool) -> bool {
    let Some(deadline) = Instant::now().checked_add(interval) else {
        return !shutdown.load(Ordering::Acquire);
    };

    loop {
        if shutdown.load(Ordering::Acquire) {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(PACING_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    fn publish(input: &str, interval: Duration) -> (SensorReport, String) {
        let shutdown = AtomicBool::new(false);
        let mut writer = PipeWriter::from_writer("mem", Vec::new());
        let report =
            publish_readings(Cursor::new(input.to_string()), &mut writer, interval, &shutdown)
                .unwrap();
        (report, String::from_utf8(writer.into_inner()).unwrap())
    }

    #[test]
    fn test_publishes_each_line_in_order() {
        let (report, sent) = publish("21.5\n21.7\n22.0\n", Duration::ZERO);
        assert_eq!(report.lines_sent, 3);
        assert!(!report.interrupted);
        assert_eq!(sent, "21.5\n21.7\n22.0\n");
    }

    #[test]
    fn test_skips_blank_lines_and_carriage_returns() {
        let (report, sent) = publish("7.0\r\n\r\n   \n7.2", Duration::ZERO);
        assert_eq!(report.lines_sent, 2);
        assert_eq!(sent, "7.0\n7.2\n");
    }

    #[test]
    fn test_interval_paces_readings() {
        let start = Instant::now();
        let (report, _) = publish("1\n2\n3\n", Duration::from_millis(20));
        assert_eq!(report.lines_sent, 3);
        // Two pauses: none before the first reading
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_shutdown_stops_publishing() {
        let shutdown = AtomicBool::new(true);
        let mut writer = PipeWriter::from_writer("mem", Vec::new());
        let report = publish_readings(
            Cursor::new("1\n2\n"),
            &mut writer,
            Duration::ZERO,
            &shutdown,
        )
        .unwrap();

        assert_eq!(report.lines_sent, 0);
        assert!(report.interrupted);
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_shutdown_interrupts_pacing() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let trigger = {
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                shutdown.store(true, Ordering::Release);
            })
        };

        let start = Instant::now();
        let mut writer = PipeWriter::from_writer("mem", Vec::new());
        let report = publish_readings(
            Cursor::new("1\n2\n"),
            &mut writer,
            Duration::from_secs(30),
            &shutdown,
        )
        .unwrap();
        trigger.join().unwrap();

        assert_eq!(report.lines_sent, 1);
        assert!(report.interrupted);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_measurement_file() {
        let settings = SensorSettings {
            sensor_type: 1,
            interval: Duration::ZERO,
            data_file: PathBuf::from("/nonexistent/measurements.txt"),
            pipe: PathBuf::from("/nonexistent/sensor.pipe"),
        };
        let shutdown = AtomicBool::new(false);

        match run_sensor(&settings, &shutdown) {
            Err(PipelineError::Io { context, source }) => {
                assert!(context.contains("measurements.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
