//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for usage examples.

// Core queue
pub use crate::queue::bounded::BoundedQueue;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};
