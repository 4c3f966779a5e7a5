use crate::events::{Event, EventLabel};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory output sink whose contents can be read back after a run.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8(bytes.clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that rejects every write.
pub(crate) struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build a timeline from `(offset_ms, label)` pairs relative to a fixed epoch.
pub(crate) fn timeline(entries: &[(i64, EventLabel)]) -> Vec<Event> {
    const BASE: i64 = 1_410_448_076_263;
    entries
        .iter()
        .map(|&(offset, label)| Event::at(BASE + offset, label))
        .collect()
}
