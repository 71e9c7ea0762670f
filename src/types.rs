// src/types.rs
use crate::error::{Result, StreamError};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent sensor channels a stream is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Accelerometer,
    Gps,
}

impl ChannelKind {
    /// Number of fields a well-formed row on this channel carries
    pub fn expected_fields(&self) -> usize {
        match self {
            ChannelKind::Accelerometer => 3,
            ChannelKind::Gps => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Accelerometer => "accelerometer",
            ChannelKind::Gps => "gps",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw accelerometer axis readings at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelerometerSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AccelerometerSample {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        AccelerometerSample { x, y, z }
    }

    /// Decode a sample from a raw CSV row (fields `x,y,z` as integers)
    ///
    /// Fails with `MalformedRecord` if the row is short or any field does
    /// not parse; the row is never partially decoded.
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        let kind = ChannelKind::Accelerometer;
        Ok(AccelerometerSample {
            x: parse_field::<i32>(record, 0, kind)?,
            y: parse_field::<i32>(record, 1, kind)?,
            z: parse_field::<i32>(record, 2, kind)?,
        })
    }
}

/// One GPS fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsSample {
    pub longitude: f64,
    pub latitude: f64,
}

impl GpsSample {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GpsSample {
            longitude,
            latitude,
        }
    }

    /// Decode a fix from a raw CSV row (fields `longitude,latitude` as floats)
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        let kind = ChannelKind::Gps;
        Ok(GpsSample {
            longitude: parse_field::<f64>(record, 0, kind)?,
            latitude: parse_field::<f64>(record, 1, kind)?,
        })
    }
}

/// One accelerometer sample + one GPS fix, stamped at read time
///
/// This is the atomic unit produced by [`StreamReader::read`]; every field
/// is fully populated or the read fails.
///
/// [`StreamReader::read`]: crate::reader::StreamReader::read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReading {
    pub accelerometer: AccelerometerSample,
    pub gps: GpsSample,
    pub timestamp: DateTime<Utc>,
}

impl AggregatedReading {
    pub fn new(
        accelerometer: AccelerometerSample,
        gps: GpsSample,
        timestamp: DateTime<Utc>,
    ) -> Self {
        AggregatedReading {
            accelerometer,
            gps,
            timestamp,
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    channel: ChannelKind,
) -> Result<T> {
    let field = record.get(index).ok_or_else(|| StreamError::MalformedRecord {
        channel,
        row: join_row(record),
        reason: format!(
            "expected {} fields, found {}",
            channel.expected_fields(),
            record.len()
        ),
    })?;

    field
        .trim()
        .parse::<T>()
        .map_err(|_| StreamError::MalformedRecord {
            channel,
            row: join_row(record),
            reason: format!("field {} ({:?}) is not numeric", index, field),
        })
}

fn join_row(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}
