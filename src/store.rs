// src/store.rs
//! Data contract of the downstream processed-agent-data store
//!
//! The store itself (HTTP CRUD surface, database, WebSocket fan-out) is an
//! external collaborator; this module only defines the payload shapes a
//! reading travels through so uploaders and subscribers stay wire-compatible
//! with it. No transport code lives here.

use crate::types::AggregatedReading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One aggregated reading annotated with a classified road state
///
/// This is the unit an uploader submits to the store's create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReading {
    pub road_state: String,
    pub agent_data: AggregatedReading,
}

impl ProcessedReading {
    pub fn new(road_state: impl Into<String>, agent_data: AggregatedReading) -> Self {
        ProcessedReading {
            road_state: road_state.into(),
            agent_data,
        }
    }
}

/// A persisted reading as the store returns it: flattened columns plus the
/// auto-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub id: i64,
    pub road_state: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl StoredReading {
    /// Flatten a submitted reading into the store's row shape, the same way
    /// the store does on insert
    pub fn from_processed(id: i64, processed: &ProcessedReading) -> Self {
        let acc = processed.agent_data.accelerometer;
        let gps = processed.agent_data.gps;
        StoredReading {
            id,
            road_state: processed.road_state.clone(),
            x: Some(acc.x as f64),
            y: Some(acc.y as f64),
            z: Some(acc.z as f64),
            latitude: Some(gps.latitude),
            longitude: Some(gps.longitude),
            timestamp: Some(processed.agent_data.timestamp),
        }
    }
}

/// Messages the store fans out to real-time subscribers on every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BroadcastEvent {
    Created { items: Vec<StoredReading> },
    Updated { item: StoredReading },
    Deleted { id: i64 },
}
