//! The single owner of the held inventory.
//!
//! [`InventoryController`] ties the normalizer to the outside world: it
//! applies live snapshots, runs one-shot sheet imports, and forwards admin
//! writes to the sink. Failures never escape as panics. Each one is turned
//! into an advisory the UI can show while the last good collection stays
//! on screen.

use std::sync::Arc;

use carlot_inventory::{
    CatalogView, Inventory, Normalizer, RawRecord, Vehicle, VehicleFilter, VehicleForm,
    VehicleId,
};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::sheet::parse_sheet;
use crate::source::{AdminSink, LiveSource, RawDocument, SheetSource, SnapshotStream};

/// Advisory shown when a source delivers no vehicles at all.
pub const EMPTY_SOURCE_ADVISORY: &str = "live collection is empty; showing sample inventory";

pub struct InventoryController {
    inventory: Inventory,
    normalizer: Normalizer,
    sink: Option<Arc<dyn AdminSink>>,
    live: Option<SnapshotStream>,
    advisory: Option<String>,
    loading: bool,
}

impl InventoryController {
    /// Start with the sample listings and no collaborators.
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            inventory: Inventory::seeded(),
            normalizer,
            sink: None,
            live: None,
            advisory: None,
            loading: false,
        }
    }

    /// Route admin writes through a backing store.
    pub fn with_sink(mut self, sink: Arc<dyn AdminSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.inventory.as_slice()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Message describing the most recent failure, if any.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Filtered listing plus facets over the current collection.
    pub fn view(&self, filter: &VehicleFilter) -> CatalogView<'_> {
        CatalogView::build(self.inventory.as_slice(), filter)
    }

    /// Subscribe to a live source, replacing any previous subscription.
    ///
    /// Nothing changes until [`pump_live`](Self::pump_live) is awaited.
    pub fn attach_live(&mut self, source: &dyn LiveSource) {
        self.live = Some(source.subscribe());
        self.loading = true;
        debug!("Attached live source");
    }

    /// Drop the live subscription. Snapshots produced afterwards are
    /// never applied.
    pub fn detach_live(&mut self) {
        if self.live.take().is_some() {
            debug!("Detached live source");
        }
        self.loading = false;
    }

    /// Wait for the next live item and apply it.
    ///
    /// Returns `false` once no subscription is attached or the source has
    /// ended.
    pub async fn pump_live(&mut self) -> bool {
        let next = match self.live.as_mut() {
            Some(stream) => stream.next().await,
            None => return false,
        };

        match next {
            Some(Ok(documents)) => {
                self.apply_snapshot(documents);
                true
            }
            Some(Err(err)) => {
                self.apply_source_error(&err);
                true
            }
            None => {
                debug!("Live source ended");
                self.live = None;
                self.loading = false;
                false
            }
        }
    }

    /// Replace the collection with a full live snapshot.
    ///
    /// Every document is kept, even ones without brand or model.
    pub fn apply_snapshot(&mut self, documents: Vec<RawDocument>) {
        let vehicles: Vec<Vehicle> = documents
            .iter()
            .map(|doc| self.normalizer.normalize_document(&doc.id, &doc.fields))
            .collect();
        self.apply_batch(vehicles);
    }

    /// Record a source failure, keeping the last known collection.
    pub fn apply_source_error(&mut self, err: &SyncError) {
        warn!(error = %err, "Inventory source failed");
        if self.inventory.is_empty() {
            self.inventory = Inventory::seeded();
        }
        self.advisory = Some(err.advisory());
        self.loading = false;
    }

    /// Fetch, parse and normalize a sheet, then replace the collection.
    ///
    /// Rows without brand and model are dropped and rows repeating an id
    /// are merged; the returned count is what ends up held. On any failure
    /// the whole batch is discarded and the collection is left as it was.
    pub async fn import_sheet(&mut self, source: &dyn SheetSource) -> Result<usize, SyncError> {
        self.loading = true;
        let rows = match Self::fetch_rows(source).await {
            Ok(rows) => rows,
            Err(err) => {
                self.apply_source_error(&err);
                return Err(err);
            }
        };

        let vehicles = self.normalizer.normalize_batch(&rows);
        let kept = vehicles.len();
        self.apply_batch(vehicles);
        let count = if kept == 0 { 0 } else { self.inventory.len() };
        info!(source = %source.describe(), rows = rows.len(), count, "Imported sheet");
        Ok(count)
    }

    async fn fetch_rows(source: &dyn SheetSource) -> Result<Vec<RawRecord>, SyncError> {
        let text = source.fetch_text().await?;
        parse_sheet(&text)
    }

    fn apply_batch(&mut self, vehicles: Vec<Vehicle>) {
        self.loading = false;
        if vehicles.is_empty() {
            info!("Source delivered no vehicles, restoring sample inventory");
            self.inventory = Inventory::seeded();
            self.advisory = Some(EMPTY_SOURCE_ADVISORY.to_string());
            return;
        }

        let mut inventory = Inventory::new();
        inventory.replace_all(vehicles);
        debug!(count = inventory.len(), "Applied inventory batch");
        self.inventory = inventory;
        self.advisory = None;
    }

    /// Create or edit a vehicle from an admin submission.
    ///
    /// The record goes through the same normalizer as every other source.
    /// The sink is written first; the held collection only changes once it
    /// succeeds.
    pub async fn save(&mut self, record: &RawRecord) -> Result<Vehicle, SyncError> {
        let vehicle = self.normalizer.normalize(record);

        if let Some(sink) = self.sink.clone() {
            if let Err(err) = sink.save(&vehicle).await {
                warn!(id = %vehicle.id, error = %err, "Save rejected");
                self.advisory = Some(err.advisory());
                return Err(err);
            }
        }

        if self.is_live() {
            debug!(id = %vehicle.id, "Saved, awaiting live echo");
        } else {
            let outcome = self.inventory.upsert(vehicle.clone());
            debug!(id = %vehicle.id, ?outcome, "Saved locally");
        }
        self.advisory = None;
        Ok(vehicle)
    }

    /// Save the contents of an admin form.
    pub async fn save_form(&mut self, form: &VehicleForm) -> Result<Vehicle, SyncError> {
        self.save(&form.to_record()).await
    }

    /// Delete a vehicle. Deleting an id that is not held is a no-op.
    pub async fn delete(&mut self, id: &VehicleId) -> Result<(), SyncError> {
        if let Some(sink) = self.sink.clone() {
            if let Err(err) = sink.delete(id).await {
                warn!(id = %id, error = %err, "Delete rejected");
                self.advisory = Some(err.advisory());
                return Err(err);
            }
        }

        if !self.is_live() && self.inventory.remove(id).is_none() {
            debug!(id = %id, "Vehicle not held, nothing removed");
        }
        self.advisory = None;
        Ok(())
    }
}

impl Default for InventoryController {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}
