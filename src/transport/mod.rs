//! Named pipe transport between the sensor and monitor processes
//!
//! The transport moves raw bytes only. It knows nothing about the queue:
//! the monitor's reader worker turns chunks into lines with
//! [`LineSplitter`] and hands those to the queue itself.
//!
//! Unix only: pipes are created with `mkfifo(3)`.

pub mod error;
pub mod fifo;
pub mod lines;
pub mod pipe;

pub use error::{TransportError, TransportResult};
pub use fifo::ensure_fifo;
pub use lines::{LineSplitter, MAX_LINE_LEN};
pub use pipe::{Chunk, PipeReader, PipeWriter, READ_CHUNK_SIZE};
