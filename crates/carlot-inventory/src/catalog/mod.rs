//! Vehicle catalog module.
//!
//! Contains the canonical vehicle type, the sample listings, and the held
//! collection.

mod inventory;
mod seed;
mod vehicle;

pub use inventory::{Inventory, Upsert};
pub use seed::seed_vehicles;
pub use vehicle::{Vehicle, UNNAMED_BRAND};
