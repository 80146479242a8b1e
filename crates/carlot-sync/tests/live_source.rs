//! Live subscription behaviour of the controller.

use std::sync::Arc;
use std::time::Duration;

use carlot_inventory::prelude::*;
use carlot_sync::{
    AdminSink, InventoryController, JsonFileStore, LiveSource, MemoryStore, RawDocument,
    SnapshotStream, SyncError, EMPTY_SOURCE_ADVISORY,
};
use futures::stream::{self, StreamExt};
use pretty_assertions::assert_eq;

/// Source that replays a fixed sequence of items.
struct ScriptedSource {
    items: Vec<Result<Vec<RawDocument>, SyncError>>,
}

impl LiveSource for ScriptedSource {
    fn subscribe(&self) -> SnapshotStream {
        stream::iter(self.items.clone()).boxed()
    }
}

fn doc(id: &str, brand: &str, model: &str, price: f64) -> RawDocument {
    RawDocument::new(
        id,
        RawRecord::new()
            .with("brand", brand)
            .with("model", model)
            .with("price", price),
    )
}

#[tokio::test]
async fn test_attach_applies_initial_snapshot() {
    let store = MemoryStore::new();
    store.publish(vec![doc("a", "Perodua", "Axia", 21000.0)]);

    let mut controller = InventoryController::default();
    controller.attach_live(&store);
    assert!(controller.is_loading());

    assert!(controller.pump_live().await);
    assert!(!controller.is_loading());
    assert_eq!(controller.vehicles().len(), 1);
    assert_eq!(controller.vehicles()[0].id, VehicleId::new("a"));
}

#[tokio::test]
async fn test_admin_save_arrives_through_echo() {
    let store = Arc::new(MemoryStore::with_vehicles(&seed_vehicles()));
    let mut controller = InventoryController::default().with_sink(store.clone());
    controller.attach_live(&*store);
    controller.pump_live().await;

    let saved = controller
        .save(
            &RawRecord::new()
                .with("id", "9")
                .with("brand", "Honda")
                .with("model", "Jazz"),
        )
        .await
        .unwrap();

    // Not applied until the store echoes it back.
    assert_eq!(controller.vehicles().len(), 4);

    assert!(controller.pump_live().await);
    assert_eq!(controller.vehicles().len(), 5);
    assert_eq!(controller.inventory().get(&saved.id), Some(&saved));
}

#[tokio::test]
async fn test_delete_echo_and_redelete() {
    let store = Arc::new(MemoryStore::with_vehicles(&seed_vehicles()));
    let mut controller = InventoryController::default().with_sink(store.clone());
    controller.attach_live(&*store);
    controller.pump_live().await;

    let id = VehicleId::new("3");
    controller.delete(&id).await.unwrap();
    controller.pump_live().await;
    assert!(!controller.inventory().contains(&id));

    controller.delete(&id).await.unwrap();
    controller.pump_live().await;
    assert_eq!(controller.vehicles().len(), 3);
}

#[tokio::test]
async fn test_error_at_startup_keeps_sample() {
    let source = ScriptedSource {
        items: vec![Err(SyncError::SourceUnavailable("permission denied".into()))],
    };

    let mut controller = InventoryController::default();
    controller.attach_live(&source);
    assert!(controller.pump_live().await);

    assert_eq!(controller.vehicles(), seed_vehicles().as_slice());
    assert!(controller.advisory().unwrap().contains("permission denied"));
    assert!(!controller.pump_live().await);
    assert!(!controller.is_live());
}

#[tokio::test]
async fn test_error_after_snapshot_keeps_last_known() {
    let source = ScriptedSource {
        items: vec![
            Ok(vec![doc("a", "Perodua", "Bezza", 30000.0)]),
            Err(SyncError::SourceUnavailable("network".into())),
        ],
    };

    let mut controller = InventoryController::default();
    controller.attach_live(&source);
    controller.pump_live().await;
    controller.pump_live().await;

    assert_eq!(controller.vehicles().len(), 1);
    assert_eq!(controller.vehicles()[0].brand, "Perodua");
    assert!(controller.advisory().is_some());
}

#[tokio::test]
async fn test_empty_snapshot_restores_sample() {
    let source = ScriptedSource {
        items: vec![Ok(vec![doc("a", "Perodua", "Bezza", 30000.0)]), Ok(Vec::new())],
    };

    let mut controller = InventoryController::default();
    controller.attach_live(&source);
    controller.pump_live().await;
    controller.pump_live().await;

    assert_eq!(controller.vehicles().len(), 4);
    assert_eq!(controller.advisory(), Some(EMPTY_SOURCE_ADVISORY));
}

#[tokio::test]
async fn test_detached_updates_are_ignored() {
    let store = Arc::new(MemoryStore::with_vehicles(&seed_vehicles()));
    let mut controller = InventoryController::default();
    controller.attach_live(&*store);
    controller.pump_live().await;

    controller.detach_live();
    store.publish(vec![doc("z", "Proton", "X50", 90000.0)]);

    assert!(!controller.pump_live().await);
    assert_eq!(controller.vehicles(), seed_vehicles().as_slice());
}

#[tokio::test]
async fn test_abandoned_pump_applies_nothing() {
    let store = Arc::new(MemoryStore::with_vehicles(&seed_vehicles()));
    let mut controller = InventoryController::default();
    controller.attach_live(&*store);
    controller.pump_live().await;

    let waited = tokio::time::timeout(Duration::from_millis(20), controller.pump_live()).await;
    assert!(waited.is_err());

    controller.detach_live();
    store.publish(Vec::new());
    assert_eq!(controller.vehicles().len(), 4);
    assert!(controller.advisory().is_none());
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("inventory.json")));
    store.replace_all(&seed_vehicles()).await.unwrap();

    let mut controller = InventoryController::default().with_sink(store.clone());
    controller.attach_live(&*store);
    controller.pump_live().await;
    assert!(!controller.pump_live().await);

    // Single-shot source has ended, so writes apply locally.
    controller.delete(&VehicleId::new("1")).await.unwrap();
    assert_eq!(controller.vehicles().len(), 3);

    store.delete(&VehicleId::new("2")).await.unwrap();
    let mut reloaded = InventoryController::default();
    reloaded.attach_live(&*store);
    reloaded.pump_live().await;

    let ids: Vec<&str> = reloaded.vehicles().iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4"]);
}

async fn load_once(store: &JsonFileStore) -> InventoryController {
    let mut controller = InventoryController::default().with_sink(Arc::new(store.clone()));
    controller.attach_live(store);
    controller.pump_live().await;
    controller.detach_live();
    controller
}

#[tokio::test]
async fn test_file_store_delete_matches_id_alias() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, r#"[{"ID":"7","brand":"Kia","model":"Rio"}]"#).unwrap();
    let store = JsonFileStore::new(&path);

    let mut controller = load_once(&store).await;
    let id = VehicleId::new("7");
    assert!(controller.inventory().contains(&id));

    controller.delete(&id).await.unwrap();
    assert!(!controller.inventory().contains(&id));
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_store_edit_without_stored_id_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, r#"[{"brand":"Kia","model":"Rio","price":1}]"#).unwrap();
    let store = JsonFileStore::new(&path);

    let mut controller = load_once(&store).await;
    let vehicle = controller.vehicles()[0].clone();

    // The generated id survives a reload.
    let again = load_once(&store).await;
    assert_eq!(again.vehicles()[0].id, vehicle.id);

    let mut form = VehicleForm::from_vehicle(&vehicle);
    form.price = "25000".to_string();
    controller.save_form(&form).await.unwrap();

    let stored = store.load().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, vehicle.id.as_str());

    let reloaded = load_once(&store).await;
    assert_eq!(reloaded.vehicles().len(), 1);
    assert_eq!(reloaded.vehicles()[0].price, 25000.0);
}
