//! Command-line arguments for the `sensor` and `monitor` binaries
//!
//! Both commands share [`GlobalArgs`] for configuration and logging. Values
//! left unset on the command line fall back to the configuration file, then
//! to the defaults below.

use crate::app::config::FileConfig;
use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::{validate_positive_int, validate_seconds};
use crate::core::version;
use crate::pipeline::{MonitorSettings, SensorSettings};
use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Args, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BUFFER_SIZE: usize = 10;
pub const DEFAULT_DISCONNECT_GRACE_SECS: u64 = 10;
pub const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Options accepted by every command
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GlobalArgs {
    /// Configuration file path
    #[arg(long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = PossibleValuesParser::new(LOG_LEVELS))]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = PossibleValuesParser::new(LOG_FORMATS))]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Colored log output (defaults to on when stdout is a terminal)
    #[arg(
        long = "color",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub color: Option<bool>,
}

/// Logging options after merging command line and configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: bool,
}

impl GlobalArgs {
    pub fn logging(&self, config: &FileConfig) -> LoggingSettings {
        LoggingSettings {
            level: self.log_level.clone().or_else(|| config.log_level.clone()),
            format: self.log_format.clone().or_else(|| config.log_format.clone()),
            file: self
                .log_file
                .as_ref()
                .or(config.log_file.as_ref())
                .map(|p| p.to_string_lossy().into_owned()),
            color: self
                .color
                .or(config.color)
                .unwrap_or_else(|| std::io::stdout().is_terminal()),
        }
    }
}

/// Publish measurement readings to a named pipe
#[derive(Parser, Debug, Clone)]
#[command(name = "sensor")]
#[command(version, long_version = version::long_version())]
pub struct SensorArgs {
    /// Sensor type label (1 = temperature, 2 = pH)
    #[arg(short = 's', long = "sensor-type", value_name = "TYPE", default_value_t = 1)]
    pub sensor_type: u8,

    /// Seconds to wait between readings (0 = no pacing)
    #[arg(short = 't', long = "interval", value_name = "SECONDS", value_parser = validate_seconds)]
    pub interval: Option<u64>,

    /// Measurement file, one reading per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Named pipe to write readings to
    #[arg(short = 'p', long = "pipe", value_name = "PIPE")]
    pub pipe: PathBuf,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl SensorArgs {
    pub fn resolve(&self, config: &FileConfig) -> SensorSettings {
        let interval = self
            .interval
            .or(config.sensor.interval)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        SensorSettings {
            sensor_type: self.sensor_type,
            interval: Duration::from_secs(interval),
            data_file: self.file.clone(),
            pipe: self.pipe.clone(),
        }
    }
}

/// Receive readings from a named pipe and record them to the temperature and pH files
///
/// `-h` names the pH file, so help is only available as `--help`.
#[derive(Parser, Debug, Clone)]
#[command(name = "monitor")]
#[command(version, long_version = version::long_version())]
#[command(disable_help_flag = true)]
pub struct MonitorArgs {
    /// Queue capacity between the pipe reader and the file writer
    #[arg(short = 'b', long = "buffer-size", value_name = "SIZE", value_parser = validate_positive_int)]
    pub buffer_size: Option<usize>,

    /// Temperature output file
    #[arg(short = 't', long = "temp-file", value_name = "FILE")]
    pub temp_file: PathBuf,

    /// pH output file
    #[arg(short = 'h', long = "ph-file", value_name = "FILE")]
    pub ph_file: PathBuf,

    /// Named pipe to read readings from (created if missing)
    #[arg(short = 'p', long = "pipe", value_name = "PIPE")]
    pub pipe: PathBuf,

    /// Seconds to wait after the sensor disconnects before stopping
    #[arg(long = "disconnect-grace", value_name = "SECONDS", value_parser = validate_seconds)]
    pub disconnect_grace: Option<u64>,

    /// Do not echo readings to stdout
    #[arg(long = "no-echo")]
    pub no_echo: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl MonitorArgs {
    pub fn resolve(&self, config: &FileConfig) -> MonitorSettings {
        let grace = self
            .disconnect_grace
            .or(config.monitor.disconnect_grace)
            .unwrap_or(DEFAULT_DISCONNECT_GRACE_SECS);
        MonitorSettings {
            buffer_size: self
                .buffer_size
                .or(config.monitor.buffer_size)
                .unwrap_or(DEFAULT_BUFFER_SIZE),
            temperature_file: self.temp_file.clone(),
            ph_file: self.ph_file.clone(),
            pipe: self.pipe.clone(),
            disconnect_grace: Duration::from_secs(grace),
            echo: !self.no_echo && config.monitor.echo.unwrap_or(true),
        }
    }
}
