//! Transport Error Types

use crate::core::error_handling::ContextualError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Cannot create named pipe {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path {} exists but is not a named pipe", path.display())]
    NotAFifo { path: PathBuf },

    #[error("Cannot open pipe {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read from pipe {} failed: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Write to pipe {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContextualError for TransportError {
    fn is_user_actionable(&self) -> bool {
        self.user_message().is_some()
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            TransportError::NotAFifo { .. } => {
                Some("The pipe path points at an existing file that is not a named pipe")
            }
            TransportError::Open { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Some("The named pipe does not exist; start the monitor first or create it with mkfifo")
            }
            TransportError::Write { source, .. } if source.kind() == io::ErrorKind::BrokenPipe => {
                Some("The monitor closed the pipe")
            }
            _ => None,
        }
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
