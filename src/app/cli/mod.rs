//! CLI module containing argument parsing for both binaries

pub mod args;

pub use args::{GlobalArgs, LoggingSettings, MonitorArgs, SensorArgs};

#[cfg(test)]
mod tests;
