//! Named pipe creation

use crate::transport::error::{TransportError, TransportResult};
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

/// Permission bits for newly created pipes (before umask)
pub const FIFO_MODE: libc::mode_t = 0o666;

/// Make sure a named pipe exists at `path`
///
/// Returns `true` if the pipe was created, `false` if one was already there.
/// An existing path that is not a FIFO is rejected rather than replaced.
pub fn ensure_fifo(path: &Path) -> TransportResult<bool> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.file_type().is_fifo() => Ok(false),
        Ok(_) => Err(TransportError::NotAFifo {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_fifo(path),
        Err(e) => Err(TransportError::Create {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn create_fifo(path: &Path) -> TransportResult<bool> {
    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|e| TransportError::Create {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;

    // SAFETY: c_path is a valid NUL-terminated string that outlives the call
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), FIFO_MODE) };
    if rc == 0 {
        log::info!("Created named pipe {}", path.display());
        return Ok(true);
    }

    let err = io::Error::last_os_error();
    if err.kind() == io::ErrorKind::AlreadyExists {
        // Lost a race with another process creating the same path
        return ensure_fifo(path);
    }
    Err(TransportError::Create {
        path: path.to_path_buf(),
        source: err,
    })
}
