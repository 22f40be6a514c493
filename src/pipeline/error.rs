//! Pipeline Error Types

use crate::core::error_handling::ContextualError;
use crate::queue::QueueError;
use crate::transport::TransportError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{worker} worker panicked")]
    WorkerPanicked { worker: &'static str },
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }
}

impl ContextualError for PipelineError {
    fn is_user_actionable(&self) -> bool {
        match self {
            PipelineError::Queue(e) => e.is_user_actionable(),
            PipelineError::Transport(e) => e.is_user_actionable(),
            PipelineError::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ),
            PipelineError::WorkerPanicked { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PipelineError::Queue(e) => e.user_message(),
            PipelineError::Transport(e) => e.user_message(),
            PipelineError::Io { context, .. } if self.is_user_actionable() => Some(context.as_str()),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
