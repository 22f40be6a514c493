//! Sensor-to-monitor telemetry pipeline
//!
//! - [`sensor`]: reads a measurement file and writes each line to a named pipe
//! - [`monitor`]: reads the pipe on a worker thread, hands lines through a
//!   [`BoundedQueue`](crate::queue::BoundedQueue) to a second worker that
//!   writes them to the temperature and pH files
//!
//! Settings are passed explicitly to each worker; nothing here relies on
//! process-wide state.

pub mod error;
pub mod event;
pub mod monitor;
pub mod sensor;

pub use error::{PipelineError, PipelineResult};
pub use event::SensorEvent;
pub use monitor::{run_monitor, run_pipeline, MonitorReport, MonitorSettings, Sinks};
pub use sensor::{run_sensor, SensorReport, SensorSettings};
