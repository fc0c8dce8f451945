//! Synchronized line reporter.
//!
//! All output produced by workers and the supervisor goes through a single
//! [`Reporter`]. Each [`Reporter::report`] call writes one full line while
//! holding the sink's mutex, so lines from different threads never interleave.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Cheaply cloneable handle to a shared, mutex-guarded line sink.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Reporter {
    /// Create a reporter writing to the given sink.
    pub fn new<W>(sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Create a reporter writing to the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Emit one line atomically.
    ///
    /// Write failures are logged and swallowed; reporting never fails the caller.
    pub fn report(&self, line: impl AsRef<str>) {
        if let Err(e) = self.try_report(line.as_ref()) {
            tracing::warn!(error = %e, "Failed to write report line");
        }
    }

    fn try_report(&self, line: &str) -> io::Result<()> {
        // A writer that panicked mid-line leaves the lock poisoned; the sink
        // itself is still usable, so keep going.
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

/// In-memory sink whose contents can be inspected after a run.
///
/// Clones share the same buffer, so one clone can be handed to a
/// [`Reporter`] while another is kept for reading.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    /// Create an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
