// src/reader/stream.rs
use crate::error::Result;
use crate::reader::clock::{Clock, SystemClock};
use crate::reader::cursor::ChannelCursor;
use crate::types::{AccelerometerSample, AggregatedReading, ChannelKind, GpsSample};
use log::debug;
use std::path::PathBuf;

/// Endless synchronized reader over an accelerometer source and a GPS source
///
/// Each call to [`read`](StreamReader::read) consumes exactly one row from
/// each channel and assembles them into an [`AggregatedReading`] stamped with
/// the current time. The two cursors advance completely independently: each
/// wraps around its own source on exhaustion, so synchronization is by
/// call-count, not by any timestamp embedded in the data.
///
/// A `StreamReader` is owned by one logical session; it is not safe to share
/// one instance across threads.
///
/// # Example
///
/// ```no_run
/// use roadsense_rs::reader::StreamReader;
///
/// let mut reader = StreamReader::new("data/accelerometer.csv", "data/gps.csv");
/// reader.start_reading().unwrap();
/// for _ in 0..10 {
///     let reading = reader.read().unwrap();
///     println!("{:?} at {:?}", reading.accelerometer, reading.gps);
/// }
/// reader.stop_reading();
/// ```
pub struct StreamReader<C: Clock = SystemClock> {
    accelerometer: ChannelCursor,
    gps: ChannelCursor,
    clock: C,
}

impl StreamReader<SystemClock> {
    /// Create a reader over the two channel sources, stamped with wall-clock
    /// UTC time. No I/O happens until `start_reading()` or the first `read()`.
    pub fn new(accelerometer_path: impl Into<PathBuf>, gps_path: impl Into<PathBuf>) -> Self {
        StreamReader::with_clock(accelerometer_path, gps_path, SystemClock)
    }
}

impl<C: Clock> StreamReader<C> {
    /// Create a reader with an explicit time source
    pub fn with_clock(
        accelerometer_path: impl Into<PathBuf>,
        gps_path: impl Into<PathBuf>,
        clock: C,
    ) -> Self {
        StreamReader {
            accelerometer: ChannelCursor::new(accelerometer_path, ChannelKind::Accelerometer),
            gps: ChannelCursor::new(gps_path, ChannelKind::Gps),
            clock,
        }
    }

    /// Open both channel cursors
    ///
    /// All-or-nothing: if either source fails to open, both cursors are
    /// closed before the error propagates, so the reader is never left
    /// partially open.
    pub fn start_reading(&mut self) -> Result<()> {
        let opened = self
            .accelerometer
            .open()
            .and_then(|_| self.gps.open());

        if let Err(err) = opened {
            self.stop_reading();
            return Err(err);
        }

        debug!(
            "stream started: accelerometer={}, gps={}",
            self.accelerometer.path().display(),
            self.gps.path().display()
        );
        Ok(())
    }

    /// Close both channel cursors; safe to call at any time
    pub fn stop_reading(&mut self) {
        self.accelerometer.close();
        self.gps.close();
    }

    /// Whether both cursors currently hold their sources
    pub fn is_reading(&self) -> bool {
        self.accelerometer.is_open() && self.gps.is_open()
    }

    /// Produce the next aggregated reading
    ///
    /// Lazily starts the stream if `start_reading()` was never called. Fails
    /// with `MalformedRecord` if either fetched row is short or non-numeric;
    /// the cursor has already advanced past the bad row, so the next call
    /// attempts a fresh one.
    pub fn read(&mut self) -> Result<AggregatedReading> {
        if !self.is_reading() {
            self.start_reading()?;
        }

        let acc_row = self.accelerometer.next_row()?;
        let gps_row = self.gps.next_row()?;

        let accelerometer = AccelerometerSample::from_record(&acc_row)?;
        let gps = GpsSample::from_record(&gps_row)?;

        Ok(AggregatedReading::new(accelerometer, gps, self.clock.now()))
    }
}
