//! Values carried through the monitor's queue

/// One item handed from the pipe reader to the sink writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorEvent {
    /// A single measurement line, without its terminator
    Reading(String),
    /// The sensor side of the pipe went away; no readings follow
    Disconnected,
}

impl SensorEvent {
    pub fn reading(line: impl Into<String>) -> Self {
        SensorEvent::Reading(line.into())
    }
}
