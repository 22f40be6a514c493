//! Queue Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Slot storage could not be set up; the queue was never constructed.
    #[error("Cannot allocate queue with capacity {capacity}: {reason}")]
    Allocation { capacity: usize, reason: String },
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        // A zero capacity comes straight from user input (-b / buffer_size)
        matches!(self, QueueError::Allocation { capacity: 0, .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::Allocation { capacity: 0, .. } => {
                Some("Buffer size must be greater than 0")
            }
            QueueError::Allocation { .. } => None,
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
