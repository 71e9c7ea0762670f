// src/lib.rs
//! # roadsense-rs
//!
//! A Rust library that turns two bounded CSV sources of simulated vehicle
//! sensor data (accelerometer + GPS) into an endless, well-formed stream of
//! synchronized aggregated readings.
//!
//! ## Features
//!
//! - **Logically infinite streams**: each channel wraps back to the start of
//!   its source on exhaustion
//! - **Recovery built in**: blank rows are skipped, optional header rows are
//!   detected and discarded, malformed rows fail one read without poisoning
//!   the stream
//! - **Independent channels**: accelerometer and GPS cursors keep their own
//!   positions and wrap cycles
//! - **Deterministic in tests**: the timestamping clock is injectable
//! - **Store compatible**: reading types serialize to the processed-agent-data
//!   store's wire shape
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roadsense_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = StreamReader::new("data/accelerometer.csv", "data/gps.csv");
//!
//!     reader.start_reading()?;
//!
//!     for _ in 0..100 {
//!         let reading = reader.read()?;
//!         println!(
//!             "acc=({}, {}, {}) gps=({}, {}) at {}",
//!             reading.accelerometer.x,
//!             reading.accelerometer.y,
//!             reading.accelerometer.z,
//!             reading.gps.longitude,
//!             reading.gps.latitude,
//!             reading.timestamp,
//!         );
//!     }
//!
//!     reader.stop_reading();
//!     Ok(())
//! }
//! ```
//!
//! ## Source format
//!
//! Each channel is a CSV file: the accelerometer source carries three integer
//! fields per row (`x,y,z`), the GPS source two float fields
//! (`longitude,latitude`). A single header row at the top of either file is
//! permitted and skipped automatically.

// Modules
pub mod error;
pub mod reader;
pub mod store;
pub mod types;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, StreamError};

// Type exports
pub use types::{AccelerometerSample, AggregatedReading, ChannelKind, GpsSample};

// Reader exports
pub use reader::{ChannelCursor, Clock, StreamReader, SystemClock};

// Store boundary exports
pub use store::{BroadcastEvent, ProcessedReading, StoredReading};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use roadsense_rs::prelude::*;
    //! ```

    pub use crate::error::{Result, StreamError};
    pub use crate::reader::{Clock, StreamReader, SystemClock};
    pub use crate::store::ProcessedReading;
    pub use crate::types::{AccelerometerSample, AggregatedReading, GpsSample};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
