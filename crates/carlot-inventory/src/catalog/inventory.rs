//! The held vehicle collection.

use crate::catalog::{seed_vehicles, Vehicle};
use crate::ids::VehicleId;
use serde::Serialize;

/// Outcome of [`Inventory::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Upsert {
    /// The id was new; the vehicle was appended.
    Inserted,
    /// The id existed; the entry was replaced in place.
    Replaced,
}

/// Ordered collection of vehicles with unique ids.
///
/// Order is insertion order and is what the catalog displays. Every write
/// path keeps ids unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    vehicles: Vec<Vehicle>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory holding the bundled sample listings.
    pub fn seeded() -> Self {
        Self::from_vehicles(seed_vehicles())
    }

    /// Build from a batch, collapsing duplicate ids.
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        let mut inventory = Self::new();
        inventory.replace_all(vehicles);
        inventory
    }

    /// Current snapshot in display order.
    pub fn as_slice(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Look up a vehicle by id.
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.get(id).is_some()
    }

    /// Replace the whole collection with a new batch.
    ///
    /// A batch that repeats an id keeps the first position and the last
    /// occurrence's contents.
    pub fn replace_all(&mut self, batch: Vec<Vehicle>) {
        self.vehicles.clear();
        for vehicle in batch {
            self.upsert(vehicle);
        }
    }

    /// Insert a vehicle, or replace the entry with the same id in place.
    pub fn upsert(&mut self, vehicle: Vehicle) -> Upsert {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => {
                *existing = vehicle;
                Upsert::Replaced
            }
            None => {
                self.vehicles.push(vehicle);
                Upsert::Inserted
            }
        }
    }

    /// Remove a vehicle by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &VehicleId) -> Option<Vehicle> {
        let index = self.vehicles.iter().position(|v| &v.id == id)?;
        Some(self.vehicles.remove(index))
    }

    /// Take the vehicles out, leaving the inventory empty.
    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
