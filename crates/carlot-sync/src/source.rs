//! Boundary traits for the external collaborators.

use async_trait::async_trait;
use carlot_inventory::{RawRecord, Vehicle, VehicleId};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// One document of a live collection: an opaque id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub fields: RawRecord,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, fields: RawRecord) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Document holding a vehicle, keyed by its id.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self::new(vehicle.id.as_str(), vehicle.to_record())
    }
}

/// Stream of whole-collection snapshots.
///
/// Each item is either the complete current collection or a transport
/// error message. The stream ends when the source goes away.
pub type SnapshotStream = BoxStream<'static, Result<Vec<RawDocument>, SyncError>>;

/// A collection that pushes its full contents on every change.
pub trait LiveSource: Send + Sync {
    /// Open a subscription. The first item is the current collection.
    fn subscribe(&self) -> SnapshotStream;
}

/// A one-shot tabular export.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the raw CSV text.
    async fn fetch_text(&self) -> Result<String, SyncError>;

    /// Human-readable origin, for logs and messages.
    fn describe(&self) -> String;
}

/// Backing store for admin create/edit/delete.
#[async_trait]
pub trait AdminSink: Send + Sync {
    /// Insert or replace the vehicle with the same id.
    async fn save(&self, vehicle: &Vehicle) -> Result<(), SyncError>;

    /// Remove a vehicle. Removing an absent id succeeds.
    async fn delete(&self, id: &VehicleId) -> Result<(), SyncError>;
}
