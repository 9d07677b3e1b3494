/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::door::{ControllerState, DoorMotion};
use crate::error::SetupError;

/// State of one door at the end of one tick.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub tick: u64,
    pub door: String,
    pub motion: Option<DoorMotion>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub state: ControllerState,
}

/**
 * Writes tick records as JSON lines.
 *
 * A write failure is logged once and disables the writer; it never stops
 * the simulation.
 */
pub struct TraceWriter<W: Write> {
    writer: W,
    failed: bool,
}

impl TraceWriter<Box<dyn Write + Send>> {
    pub fn create(path: &str) -> Result<TraceWriter<Box<dyn Write + Send>>, SetupError> {
        let file = File::create(path).map_err(|source| SetupError::TraceOpen {
            path: path.to_string(),
            source,
        })?;
        Ok(TraceWriter::new(Box::new(BufWriter::new(file))))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> TraceWriter<W> {
        TraceWriter {
            writer,
            failed: false,
        }
    }

    pub fn write(&mut self, record: &TickRecord) {
        if self.failed {
            return;
        }

        let result = serde_json::to_writer(&mut self.writer, record)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            warn!("Trace disabled after write error: {}", e);
            self.failed = true;
        }
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush trace: {}", e);
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
