// src/error.rs
use crate::types::ChannelKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {channel} record [{row}]: {reason}")]
    MalformedRecord {
        channel: ChannelKind,
        row: String,
        reason: String,
    },

    #[error("source contains no non-empty rows: {path}")]
    SourceExhausted { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, StreamError>;
