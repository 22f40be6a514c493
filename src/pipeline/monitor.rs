//! Monitor side: named pipe to sink files through a bounded queue
//!
//! ```text
//! FIFO ──read_chunk──▶ [pipe-reader] ──enqueue──▶ BoundedQueue ──dequeue──▶ [sink-writer] ──▶ Temp / pH files
//! ```
//!
//! The reader produces [`SensorEvent::Reading`] for every line and always
//! finishes with exactly one [`SensorEvent::Disconnected`], which is what
//! stops the writer. Both workers are plain OS threads joined before the
//! queue is destroyed.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::event::SensorEvent;
use crate::queue::BoundedQueue;
use crate::transport::{
    ensure_fifo, Chunk, LineSplitter, PipeReader, TransportError, TransportResult,
};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Resolved monitor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    /// Queue capacity between reader and writer
    pub buffer_size: usize,
    pub temperature_file: PathBuf,
    pub ph_file: PathBuf,
    pub pipe: PathBuf,
    /// Wait after the sensor goes away before declaring it disconnected
    pub disconnect_grace: Duration,
    /// Copy each reading to stdout
    pub echo: bool,
}

/// Outcome of one monitor run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub lines_received: usize,
    pub lines_written: usize,
}

type BoxedSink = Box<dyn Write + Send>;

/// Output destinations for the sink writer
///
/// Every reading goes to both files; readings are not classified by sensor type.
pub struct Sinks {
    temperature: BoxedSink,
    ph: BoxedSink,
    echo: Option<BoxedSink>,
}

impl Sinks {
    pub fn new(temperature: impl Write + Send + 'static, ph: impl Write + Send + 'static) -> Self {
        Self {
            temperature: Box::new(temperature),
            ph: Box::new(ph),
            echo: None,
        }
    }

    pub fn with_echo(mut self, echo: impl Write + Send + 'static) -> Self {
        self.echo = Some(Box::new(echo));
        self
    }

    /// Create (or truncate) both sink files named in `settings`
    pub fn open(settings: &MonitorSettings) -> PipelineResult<Self> {
        let create = |path: &PathBuf, label: &str| {
            File::create(path).map(BufWriter::new).map_err(|e| {
                PipelineError::io(
                    format!("Cannot open {} file {}", label, path.display()),
                    e,
                )
            })
        };

        let sinks = Self::new(
            create(&settings.temperature_file, "temperature")?,
            create(&settings.ph_file, "pH")?,
        );
        Ok(if settings.echo {
            sinks.with_echo(io::stdout())
        } else {
            sinks
        })
    }

    fn record(&mut self, reading: &str) -> io::Result<()> {
        if let Some(echo) = self.echo.as_mut() {
            writeln!(echo, "{}", reading)?;
            echo.flush()?;
        }
        writeln!(self.temperature, "Temp:{}", reading)?;
        self.temperature.flush()?;
        writeln!(self.ph, "pH:{}", reading)?;
        self.ph.flush()
    }
}

/// Run the monitor until the sensor disconnects
///
/// Sink files are opened and the FIFO created before any worker starts.
pub fn run_monitor(settings: &MonitorSettings) -> PipelineResult<MonitorReport> {
    log::debug!("Monitor settings: {:?}", settings);

    let queue = Arc::new(BoundedQueue::new(settings.buffer_size)?);
    let sinks = Sinks::open(settings)?;
    if ensure_fifo(&settings.pipe)? {
        log::debug!("Named pipe {} was missing and has been created", settings.pipe.display());
    }

    log::info!(
        "Monitor waiting for sensor on {} (buffer size {})",
        settings.pipe.display(),
        settings.buffer_size
    );
    let pipe = settings.pipe.clone();
    run_pipeline(
        queue,
        move || PipeReader::open(pipe),
        sinks,
        settings.disconnect_grace,
    )
}

/// Wire a pipe source to `sinks` through `queue` and wait for both workers
///
/// `open_source` runs on the reader thread, so a blocking FIFO open does
/// not hold up the caller.
pub fn run_pipeline<R, F>(
    queue: Arc<BoundedQueue<SensorEvent>>,
    open_source: F,
    sinks: Sinks,
    disconnect_grace: Duration,
) -> PipelineResult<MonitorReport>
where
    R: Read + 'static,
    F: FnOnce() -> TransportResult<PipeReader<R>> + Send + 'static,
{
    let writer = spawn_writer(Arc::clone(&queue), sinks)?;
    let reader = match spawn_reader(Arc::clone(&queue), open_source, disconnect_grace) {
        Ok(handle) => handle,
        Err(e) => {
            queue.enqueue(SensorEvent::Disconnected);
            let _ = join_worker(writer, "sink-writer");
            return Err(e);
        }
    };

    let received = join_worker(reader, "pipe-reader");
    let written = join_worker(writer, "sink-writer");

    match Arc::try_unwrap(queue) {
        Ok(queue) => queue.destroy(),
        Err(_) => log::warn!("Queue still shared after workers finished"),
    }

    let report = MonitorReport {
        lines_received: received?,
        lines_written: written?,
    };
    log::info!(
        "Monitor finished: {} reading(s) received, {} written",
        report.lines_received,
        report.lines_written
    );
    Ok(report)
}

fn join_worker(
    handle: JoinHandle<PipelineResult<usize>>,
    worker: &'static str,
) -> PipelineResult<usize> {
    handle
        .join()
        .map_err(|_| PipelineError::WorkerPanicked { worker })?
}

/// Sends the final `Disconnected` however the reader exits, panics included
struct DisconnectOnDrop {
    queue: Arc<BoundedQueue<SensorEvent>>,
}

impl Drop for DisconnectOnDrop {
    fn drop(&mut self) {
        self.queue.enqueue(SensorEvent::Disconnected);
    }
}

fn spawn_reader<R, F>(
    queue: Arc<BoundedQueue<SensorEvent>>,
    open_source: F,
    disconnect_grace: Duration,
) -> PipelineResult<JoinHandle<PipelineResult<usize>>>
where
    R: Read + 'static,
    F: FnOnce() -> TransportResult<PipeReader<R>> + Send + 'static,
{
    thread::Builder::new()
        .name("pipe-reader".to_string())
        .spawn(move || -> PipelineResult<usize> {
            let _disconnect = DisconnectOnDrop {
                queue: Arc::clone(&queue),
            };

            let mut reader = open_source()?;
            log::info!("Sensor connected on {}", reader.path().display());

            let (received, read_error) = collect_readings(&mut reader, &queue);

            // No queue guard is held here; the writer keeps draining
            if !disconnect_grace.is_zero() {
                thread::sleep(disconnect_grace);
            }
            log::warn!(
                "Sensor disconnected from {}, stopping collection",
                reader.path().display()
            );
            match read_error {
                Some(e) => Err(e.into()),
                None => Ok(received),
            }
        })
        .map_err(|e| PipelineError::io("Cannot start pipe reader thread", e))
}

fn spawn_writer(
    queue: Arc<BoundedQueue<SensorEvent>>,
    mut sinks: Sinks,
) -> PipelineResult<JoinHandle<PipelineResult<usize>>> {
    thread::Builder::new()
        .name("sink-writer".to_string())
        .spawn(move || drain_readings(&queue, &mut sinks))
        .map_err(|e| PipelineError::io("Cannot start sink writer thread", e))
}

/// Read the pipe until it closes, queueing one event per line
///
/// A read error ends collection like the sensor going away; it is handed
/// back alongside the count so the caller can report it.
pub fn collect_readings<R: Read>(
    reader: &mut PipeReader<R>,
    queue: &BoundedQueue<SensorEvent>,
) -> (usize, Option<TransportError>) {
    let mut splitter = LineSplitter::new();
    let mut received = 0;
    let mut read_error = None;

    let mut forward = |line: String| {
        log::debug!("Received reading: {}", line);
        queue.enqueue(SensorEvent::Reading(line));
        received += 1;
    };

    loop {
        match reader.read_chunk() {
            Ok(Chunk::Data(bytes)) => splitter.push(&bytes).into_iter().for_each(&mut forward),
            Ok(Chunk::EndOfStream) => break,
            Err(e) => {
                log::warn!("{}", e);
                read_error = Some(e);
                break;
            }
        }
    }
    if let Some(line) = splitter.finish() {
        forward(line);
    }

    (received, read_error)
}

/// Keeps consuming until `Disconnected` if the writer panics, so the
/// reader can still finish and be joined
struct DrainOnUnwind<'a> {
    queue: &'a BoundedQueue<SensorEvent>,
}

impl Drop for DrainOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            while let SensorEvent::Reading(_) = self.queue.dequeue() {}
        }
    }
}

/// Write every queued reading to the sinks until `Disconnected` arrives
///
/// After a sink failure the queue is still drained so the reader never
/// blocks on a full queue; the first error is returned at the end.
pub fn drain_readings(queue: &BoundedQueue<SensorEvent>, sinks: &mut Sinks) -> PipelineResult<usize> {
    let _unwind = DrainOnUnwind { queue };
    let mut written = 0;
    let mut failure = None;

    loop {
        match queue.dequeue() {
            SensorEvent::Reading(line) => {
                if failure.is_some() {
                    continue;
                }
                match sinks.record(&line) {
                    Ok(()) => written += 1,
                    Err(e) => {
                        log::error!("Cannot write reading to sink files: {}", e);
                        failure = Some(e);
                    }
                }
            }
            SensorEvent::Disconnected => break,
        }
    }

    match failure {
        Some(e) => Err(PipelineError::io("Cannot write reading to sink files", e)),
        None => Ok(written),
    }
}
