//! Document stores that act as both live source and admin sink.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use carlot_inventory::{Field, Normalizer, RawRecord, Vehicle, VehicleId};
use futures::stream::{self, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{SinkAction, SyncError};
use crate::source::{AdminSink, LiveSource, RawDocument, SnapshotStream};

/// In-process document collection.
///
/// Every write publishes the full collection to all subscribers. Newer
/// snapshots replace older unread ones, so a slow subscriber only ever
/// sees the latest state.
#[derive(Debug)]
pub struct MemoryStore {
    docs: watch::Sender<Vec<RawDocument>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<RawDocument>) -> Self {
        let (docs, _) = watch::channel(documents);
        Self {
            docs,
            reject_writes: AtomicBool::new(false),
        }
    }

    pub fn with_vehicles<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Self {
        Self::with_documents(vehicles.into_iter().map(RawDocument::from_vehicle).collect())
    }

    /// Current documents.
    pub fn documents(&self) -> Vec<RawDocument> {
        self.docs.borrow().clone()
    }

    /// Replace the whole collection, as an external writer would.
    pub fn publish(&self, documents: Vec<RawDocument>) {
        self.docs.send_replace(documents);
    }

    /// Make subsequent admin writes fail, e.g. to simulate a permission error.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self, action: SinkAction) -> Result<(), SyncError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(SyncError::sink(action, "store is read-only"));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveSource for MemoryStore {
    fn subscribe(&self) -> SnapshotStream {
        let rx = self.docs.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rx.borrow_and_update().clone();
            Some((Ok(snapshot), (rx, false)))
        })
        .boxed()
    }
}

#[async_trait]
impl AdminSink for MemoryStore {
    async fn save(&self, vehicle: &Vehicle) -> Result<(), SyncError> {
        self.check_writable(SinkAction::Save)?;
        let doc = RawDocument::from_vehicle(vehicle);
        self.docs.send_modify(|docs| {
            match docs.iter_mut().find(|existing| existing.id == doc.id) {
                Some(existing) => *existing = doc,
                None => docs.push(doc),
            }
        });
        debug!(id = %vehicle.id, "Saved vehicle to memory store");
        Ok(())
    }

    async fn delete(&self, id: &VehicleId) -> Result<(), SyncError> {
        self.check_writable(SinkAction::Delete)?;
        self.docs
            .send_modify(|docs| docs.retain(|doc| doc.id != id.as_str()));
        debug!(id = %id, "Deleted vehicle from memory store");
        Ok(())
    }
}

/// Collection persisted as a JSON array of vehicle records.
///
/// A missing file reads as an empty collection. Writes go to a sibling
/// temp file first and are renamed into place.
///
/// Documents are keyed by the id the normalizer would give them, so
/// records stored under any id alias are found by admin writes. Records
/// with no id get a generated one, written back on the next load so the
/// id stays stable across reads.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    poll_interval: Option<Duration>,
    normalizer: Normalizer,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: None,
            normalizer: Normalizer::default(),
        }
    }

    /// Resolve document ids with a custom alias table.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Keep subscriptions open, re-reading the file every `interval` and
    /// emitting whenever its contents change.
    pub fn with_polling(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored document.
    pub async fn load(&self) -> Result<Vec<RawDocument>, SyncError> {
        let (docs, backfilled) = self.read_documents().await?;
        if backfilled > 0 {
            self.write(&docs).await.map_err(|e| {
                SyncError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
            })?;
            info!(path = %self.path.display(), backfilled, "Assigned ids to stored records");
        }
        Ok(docs)
    }

    /// Overwrite the file with the given vehicles.
    pub async fn replace_all(&self, vehicles: &[Vehicle]) -> Result<(), SyncError> {
        let docs: Vec<RawDocument> = vehicles.iter().map(RawDocument::from_vehicle).collect();
        self.write(&docs)
            .await
            .map_err(|e| SyncError::sink(SinkAction::Save, e.to_string()))?;
        info!(path = %self.path.display(), count = docs.len(), "Replaced stored inventory");
        Ok(())
    }

    async fn load_for_write(&self, action: SinkAction) -> Result<Vec<RawDocument>, SyncError> {
        self.load()
            .await
            .map_err(|e| SyncError::sink(action, e.to_string()))
    }

    /// Parse the file, returning the documents and how many of them had
    /// an id generated.
    async fn read_documents(&self) -> Result<(Vec<RawDocument>, usize), SyncError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((Vec::new(), 0)),
            Err(e) => {
                return Err(SyncError::SourceUnavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok((Vec::new(), 0));
        }

        let records: Vec<RawRecord> = serde_json::from_str(&content)?;
        let id_key = self
            .normalizer
            .aliases()
            .aliases(Field::Id)
            .first()
            .map_or(Field::Id.as_str(), String::as_str);

        let mut backfilled = 0;
        let docs = records
            .into_iter()
            .map(|mut fields| {
                let id = match self.normalizer.record_id(&fields) {
                    Some(id) => id,
                    None => {
                        let id = VehicleId::generate();
                        fields.insert(id_key, id.as_str());
                        backfilled += 1;
                        id
                    }
                };
                RawDocument::new(id.into_inner(), fields)
            })
            .collect();
        Ok((docs, backfilled))
    }

    async fn write(&self, docs: &[RawDocument]) -> std::io::Result<()> {
        let records: Vec<&RawRecord> = docs.iter().map(|doc| &doc.fields).collect();
        let json = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}

impl LiveSource for JsonFileStore {
    /// One snapshot of the file contents. Without polling the stream then
    /// ends; with polling it emits again on every change.
    fn subscribe(&self) -> SnapshotStream {
        let store = self.clone();
        let Some(interval) = self.poll_interval else {
            return stream::once(async move { store.load().await }).boxed();
        };

        stream::unfold(
            (store, None::<Result<Vec<RawDocument>, SyncError>>),
            move |(store, last)| async move {
                loop {
                    if last.is_some() {
                        tokio::time::sleep(interval).await;
                    }
                    let current = store.load().await;
                    if last.as_ref() != Some(&current) {
                        return Some((current.clone(), (store, Some(current))));
                    }
                }
            },
        )
        .boxed()
    }
}

#[async_trait]
impl AdminSink for JsonFileStore {
    async fn save(&self, vehicle: &Vehicle) -> Result<(), SyncError> {
        let mut docs = self.load_for_write(SinkAction::Save).await?;
        let doc = RawDocument::from_vehicle(vehicle);
        match docs.iter_mut().find(|existing| existing.id == doc.id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        self.write(&docs)
            .await
            .map_err(|e| SyncError::sink(SinkAction::Save, e.to_string()))?;
        debug!(id = %vehicle.id, path = %self.path.display(), "Saved vehicle");
        Ok(())
    }

    async fn delete(&self, id: &VehicleId) -> Result<(), SyncError> {
        let mut docs = self.load_for_write(SinkAction::Delete).await?;
        let before = docs.len();
        docs.retain(|doc| doc.id != id.as_str());
        if docs.len() == before {
            debug!(id = %id, "Vehicle not stored, nothing to delete");
            return Ok(());
        }
        self.write(&docs)
            .await
            .map_err(|e| SyncError::sink(SinkAction::Delete, e.to_string()))?;
        debug!(id = %id, path = %self.path.display(), "Deleted vehicle");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_inventory::catalog::seed_vehicles;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_memory_subscribe_yields_current_first() {
        let store = MemoryStore::with_vehicles(&seed_vehicles());
        let mut stream = store.subscribe();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].id, "1");
    }

    #[tokio::test]
    async fn test_memory_save_publishes_snapshot() {
        let store = MemoryStore::new();
        let mut stream = store.subscribe();
        assert!(stream.next().await.unwrap().unwrap().is_empty());

        let car = Vehicle::new(VehicleId::new("x"), "Honda", "Jazz");
        store.save(&car).await.unwrap();

        let next = stream.next().await.unwrap().unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "x");
    }

    #[tokio::test]
    async fn test_memory_save_replaces_same_id() {
        let store = MemoryStore::with_vehicles(&seed_vehicles());
        let mut car = seed_vehicles().remove(0);
        car.price = 1.0;
        store.save(&car).await.unwrap();

        let docs = store.documents();
        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0].fields.get("price"), Some(&serde_json::json!(1.0)));
    }

    #[tokio::test]
    async fn test_memory_rejected_write_leaves_docs() {
        let store = MemoryStore::with_vehicles(&seed_vehicles());
        store.reject_writes(true);

        let err = store.delete(&VehicleId::new("1")).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::SinkFailure {
                action: SinkAction::Delete,
                ..
            }
        ));
        assert_eq!(store.documents().len(), 4);
    }

    #[tokio::test]
    async fn test_memory_stream_ends_with_store() {
        let store = MemoryStore::new();
        let mut stream = store.subscribe();
        stream.next().await;
        drop(store);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("inventory.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_store_save_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("inventory.json"));

        store.replace_all(&seed_vehicles()).await.unwrap();
        let car = Vehicle::new(VehicleId::new("5"), "Honda", "Jazz");
        store.save(&car).await.unwrap();
        store.delete(&VehicleId::new("2")).await.unwrap();
        store.delete(&VehicleId::new("2")).await.unwrap();

        let ids: Vec<String> = store.load().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_json_store_resolves_custom_id_alias() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, r#"[{"stockNo":"S-1","brand":"Kia"},{"brand":"Ford"}]"#).unwrap();

        let aliases = carlot_inventory::AliasTable::default().with_aliases(Field::Id, ["stockNo"]);
        let store = JsonFileStore::new(&path).with_normalizer(Normalizer::new(aliases));

        let docs = store.load().await.unwrap();
        assert_eq!(docs[0].id, "S-1");
        assert_eq!(docs[1].fields.get("stockNo"), Some(&serde_json::json!(docs[1].id)));

        store.delete(&VehicleId::new("S-1")).await.unwrap();
        let ids: Vec<String> = store.load().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![docs[1].id.clone()]);
    }

    #[tokio::test]
    async fn test_json_store_polling_emits_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("inventory.json"))
            .with_polling(Duration::from_millis(10));
        store.replace_all(&seed_vehicles()).await.unwrap();

        let mut stream = store.subscribe();
        assert_eq!(stream.next().await.unwrap().unwrap().len(), 4);

        store.delete(&VehicleId::new("4")).await.unwrap();
        let next = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(next.len(), 3);
    }

    #[tokio::test]
    async fn test_json_store_corrupt_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        let mut stream = store.subscribe();
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, SyncError::ParseMalformed(_)));
        assert!(stream.next().await.is_none());
    }
}
