// src/reader/cursor.rs
use crate::error::{Result, StreamError};
use crate::types::ChannelKind;
use csv::{Reader, ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Stateful cursor over one channel's backing CSV source
///
/// The cursor exclusively owns its file handle between `open()` and
/// `close()`. Reading past the end of the source transparently re-opens it
/// from the start, so the row sequence is logically infinite as long as the
/// source holds at least one non-empty row.
///
/// # Example
///
/// ```no_run
/// use roadsense_rs::reader::ChannelCursor;
/// use roadsense_rs::types::ChannelKind;
///
/// let mut cursor = ChannelCursor::new("data/accelerometer.csv", ChannelKind::Accelerometer);
/// cursor.open().unwrap();
/// let row = cursor.next_row().unwrap();
/// println!("x = {}", row.get(0).unwrap());
/// cursor.close();
/// ```
pub struct ChannelCursor {
    path: PathBuf,
    kind: ChannelKind,
    reader: Option<Reader<File>>,
    // One-row lookahead: holds a peeked first row that turned out to be
    // data rather than a header. Drained before the underlying reader.
    lookahead: Option<StringRecord>,
}

impl ChannelCursor {
    /// Create a cursor over `path`. No I/O happens until `open()` or the
    /// first `next_row()`.
    pub fn new(path: impl Into<PathBuf>, kind: ChannelKind) -> Self {
        ChannelCursor {
            path: path.into(),
            kind,
            reader: None,
            lookahead: None,
        }
    }

    /// The channel this cursor feeds
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Path of the backing source
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing source is currently acquired
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Acquire the backing source and reset the read position to the start
    ///
    /// Calling this while already open releases the prior handle first, so
    /// it doubles as "restart from the beginning". Detects and discards an
    /// optional header row: a first row of the expected width whose first
    /// field is not numeric. A width-matching first row that *is* numeric is
    /// genuine data and is kept in the lookahead buffer for the next
    /// `next_row()` call.
    pub fn open(&mut self) -> Result<()> {
        self.close();

        let file = File::open(&self.path).map_err(|err| StreamError::SourceUnavailable {
            path: self.path.clone(),
            source: err,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        // Header detection: peek exactly one row.
        let mut first = StringRecord::new();
        if reader.read_record(&mut first)? {
            if first.len() != self.kind.expected_fields() {
                // Wrong width: not a header, treat as data.
                self.lookahead = Some(first);
            } else {
                match first.get(0) {
                    Some(field) if field.trim().parse::<f64>().is_ok() => {
                        // Numeric first row is data; keep it so no sample is lost.
                        self.lookahead = Some(first);
                    }
                    _ => {
                        debug!(
                            "{} channel: discarding header row [{}]",
                            self.kind,
                            first.iter().collect::<Vec<_>>().join(",")
                        );
                    }
                }
            }
        }

        self.reader = Some(reader);
        Ok(())
    }

    /// Release the backing source; no-op when already closed
    pub fn close(&mut self) {
        self.reader = None;
        self.lookahead = None;
    }

    /// Return the next structurally non-empty row
    ///
    /// Opens the source first if the cursor is closed. Rows whose fields are
    /// all blank or whitespace are skipped. On exhaustion the source is
    /// re-opened once and the search resumes from the start; if the fresh
    /// pass also yields nothing the source holds no data rows at all and the
    /// call fails with `SourceExhausted` instead of looping forever.
    pub fn next_row(&mut self) -> Result<StringRecord> {
        if self.reader.is_none() {
            self.open()?;
        }

        let mut restarted = false;
        loop {
            match self.fetch_row()? {
                Some(record) => {
                    if is_blank(&record) {
                        continue;
                    }
                    return Ok(record);
                }
                None => {
                    if restarted {
                        warn!("{} channel: source {} has no data rows", self.kind, self.path.display());
                        return Err(StreamError::SourceExhausted {
                            path: self.path.clone(),
                        });
                    }
                    debug!(
                        "{} channel: source exhausted, restarting from the top of {}",
                        self.kind,
                        self.path.display()
                    );
                    restarted = true;
                    self.open()?;
                }
            }
        }
    }

    /// Pull one raw row, draining the lookahead buffer before the reader
    fn fetch_row(&mut self) -> Result<Option<StringRecord>> {
        if let Some(record) = self.lookahead.take() {
            return Ok(Some(record));
        }

        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };

        let mut record = StringRecord::new();
        if reader.read_record(&mut record)? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }
}

/// A row is structurally empty when every field is blank or whitespace
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_cursor_starts_closed() {
        let cursor = ChannelCursor::new("nonexistent.csv", ChannelKind::Gps);
        assert!(!cursor.is_open());
        assert_eq!(cursor.kind(), ChannelKind::Gps);
    }

    #[test]
    fn test_open_missing_file_is_source_unavailable() {
        let mut cursor = ChannelCursor::new("no/such/file.csv", ChannelKind::Accelerometer);
        let err = cursor.open().unwrap_err();
        assert!(matches!(err, StreamError::SourceUnavailable { .. }));
        assert!(!cursor.is_open());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut cursor = ChannelCursor::new("nonexistent.csv", ChannelKind::Gps);
        cursor.close();
        cursor.close();
        assert!(!cursor.is_open());
    }

    #[test]
    fn test_next_row_auto_opens() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "acc.csv", "1,2,3\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Accelerometer);

        let row = cursor.next_row().unwrap();
        assert_eq!(row.get(0), Some("1"));
        assert!(cursor.is_open());
    }

    #[test]
    fn test_header_row_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "acc.csv", "x,y,z\n1,2,3\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Accelerometer);

        cursor.open().unwrap();
        let row = cursor.next_row().unwrap();
        assert_eq!(row.get(0), Some("1"));
    }

    #[test]
    fn test_numeric_first_row_is_not_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "acc.csv", "1,2,3\n4,5,6\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Accelerometer);

        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("1"));
        assert_eq!(cursor.next_row().unwrap().get(0), Some("4"));
    }

    #[test]
    fn test_wrong_width_first_row_is_kept_as_data() {
        // A malformed-width first row is not treated as a header.
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "acc.csv", "a,b\n1,2,3\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Accelerometer);

        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("a"));
        assert_eq!(cursor.next_row().unwrap().get(0), Some("1"));
    }

    #[test]
    fn test_exhaustion_wraps_to_first_row() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "gps.csv", "10.5,20.25\n11.0,21.0\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Gps);

        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("10.5"));
        assert_eq!(cursor.next_row().unwrap().get(0), Some("11.0"));
        // Third call wraps around.
        assert_eq!(cursor.next_row().unwrap().get(0), Some("10.5"));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "gps.csv", "10.5,20.25\n,\n   ,  \n11.0,21.0\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Gps);

        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("10.5"));
        assert_eq!(cursor.next_row().unwrap().get(0), Some("11.0"));
    }

    #[test]
    fn test_all_blank_source_is_exhausted_not_infinite() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "gps.csv", ",\n,\n,\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Gps);

        cursor.open().unwrap();
        let err = cursor.next_row().unwrap_err();
        assert!(matches!(err, StreamError::SourceExhausted { .. }));
    }

    #[test]
    fn test_empty_file_is_exhausted() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "gps.csv", "");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Gps);

        cursor.open().unwrap();
        let err = cursor.next_row().unwrap_err();
        assert!(matches!(err, StreamError::SourceExhausted { .. }));
    }

    #[test]
    fn test_reopen_resets_position() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "gps.csv", "10.5,20.25\n11.0,21.0\n");
        let mut cursor = ChannelCursor::new(path, ChannelKind::Gps);

        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("10.5"));
        cursor.open().unwrap();
        assert_eq!(cursor.next_row().unwrap().get(0), Some("10.5"));
    }
}
