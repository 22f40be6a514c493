//! Bounded Blocking Queue
//!
//! The hand-off point between the monitor's pipe reader and its sink writer.
//!
//! # Overview
//!
//! [`BoundedQueue`] is a fixed-capacity FIFO that any number of producer and
//! consumer threads may share:
//!
//! - **Fixed capacity**: storage is reserved once at construction
//! - **FIFO**: values come out in the order they went in
//! - **Backpressure by blocking**: `enqueue` waits while full, `dequeue` waits
//!   while empty
//! - **Ownership transfer**: values are moved in and moved out, never cloned
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐                                   ┌──────────────┐
//! │  Producer A  │──┐                             ┌──│  Consumer X  │
//! └──────────────┘  │ enqueue                     │  └──────────────┘
//! ┌──────────────┐  │  ┌─────────────────────────┐│ dequeue
//! │  Producer B  │──┼─▶│ Mutex<Ring>             │┼──┌──────────────┐
//! └──────────────┘  │  │ ┌───┬───┬───┬───┬───┐   ││  │  Consumer Y  │
//!                   │  │ │ c │ d │   │ a │ b │   ││  └──────────────┘
//!                   │  │ └───┴───┴───┴───┴───┘   │
//!                   │  │       tail▲   ▲head     │
//!                   │  │ not_full    not_empty   │
//!                   │  └─────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use sensorpipe::queue::BoundedQueue;
//!
//! let queue = BoundedQueue::new(3)?;
//! queue.enqueue("a");
//! queue.enqueue("b");
//! queue.enqueue("c");
//!
//! assert!(queue.is_full());
//! assert_eq!(queue.dequeue(), "a");
//! assert_eq!(queue.try_dequeue(), Some("b"));
//! assert_eq!(queue.len(), 1);
//!
//! queue.destroy();
//! # Ok::<(), sensorpipe::queue::QueueError>(())
//! ```

pub mod api;
mod bounded;
mod error;

pub use bounded::BoundedQueue;
pub use error::{QueueError, QueueResult};

#[cfg(test)]
mod tests;
