//! Chunked pipe endpoints
//!
//! Opening a FIFO blocks until the other side opens it too: a reader waits
//! for a writer and vice versa. Both endpoints are generic over the
//! underlying stream so workers can be driven from memory in tests.

use crate::transport::error::{TransportError, TransportResult};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Largest chunk returned by a single [`PipeReader::read_chunk`]
pub const READ_CHUNK_SIZE: usize = 256;

/// Outcome of one read from the pipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Data(Vec<u8>),
    /// Every writer has closed its end
    EndOfStream,
}

#[derive(Debug)]
pub struct PipeReader<R = File> {
    path: PathBuf,
    inner: R,
}

impl PipeReader<File> {
    /// Open the pipe for reading, waiting for a writer to connect
    pub fn open(path: impl AsRef<Path>) -> TransportResult<Self> {
        let path = path.as_ref();
        log::debug!("Opening {} for reading", path.display());

        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| TransportError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self::from_reader(path, file))
    }
}

impl<R: Read> PipeReader<R> {
    pub fn from_reader(path: impl Into<PathBuf>, inner: R) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read whatever is available, up to [`READ_CHUNK_SIZE`] bytes
    pub fn read_chunk(&mut self) -> TransportResult<Chunk> {
        let mut buf = [0u8; READ_CHUNK_SIZE];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(Chunk::EndOfStream),
                Ok(n) => return Ok(Chunk::Data(buf[..n].to_vec())),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(TransportError::Read {
                        path: self.path.clone(),
                        source: e,
                    })
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct PipeWriter<W = File> {
    path: PathBuf,
    inner: W,
}

impl PipeWriter<File> {
    /// Open the pipe for writing, waiting for a reader to connect
    pub fn open(path: impl AsRef<Path>) -> TransportResult<Self> {
        let path = path.as_ref();
        log::debug!("Opening {} for writing", path.display());

        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| TransportError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self::from_writer(path, file))
    }
}

impl<W: Write> PipeWriter<W> {
    pub fn from_writer(path: impl Into<PathBuf>, inner: W) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole chunk and flush it through to the reader
    pub fn write_chunk(&mut self, bytes: &[u8]) -> TransportResult<()> {
        self.inner
            .write_all(bytes)
            .and_then(|()| self.inner.flush())
            .map_err(|e| TransportError::Write {
                path: self.path.clone(),
                source: e,
            })
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
