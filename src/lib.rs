//! Sensor telemetry over a named pipe
//!
//! A `sensor` process writes measurement lines into a FIFO; a `monitor`
//! process reads them and hands each one through a [`queue::BoundedQueue`]
//! to a writer that records it to the temperature and pH files.

pub mod app;
pub mod core;
pub mod pipeline;
pub mod queue;
pub mod transport;
