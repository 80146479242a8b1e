//! Admin editing form state.

use serde::{Deserialize, Serialize};

use crate::catalog::Vehicle;
use crate::ids::VehicleId;
use crate::normalize::RawRecord;

/// Text state of the admin create/edit form.
///
/// Every input is kept as typed; coercion happens when the submission is
/// normalized. `id` is set while editing an existing listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleForm {
    pub id: Option<VehicleId>,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub mileage: String,
    pub fuel_type: String,
    pub transmission: String,
    pub location: String,
    pub description: String,
    /// Comma-separated image URLs.
    pub images: String,
    pub whatsapp: String,
}

impl VehicleForm {
    /// Empty form for a new listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing listing.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: Some(vehicle.id.clone()),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.to_string(),
            price: vehicle.price.to_string(),
            mileage: vehicle.mileage.to_string(),
            fuel_type: vehicle.fuel_type.clone(),
            transmission: vehicle.transmission.clone(),
            location: vehicle.location.clone(),
            description: vehicle.description.clone(),
            images: vehicle.images.join(", "),
            whatsapp: vehicle.whatsapp.clone(),
        }
    }

    /// Whether the form edits an existing listing.
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Reset every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Submission payload keyed by canonical field names.
    ///
    /// A new listing gets its id when the payload is normalized.
    pub fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new()
            .with("brand", self.brand.as_str())
            .with("model", self.model.as_str())
            .with("year", self.year.as_str())
            .with("price", self.price.as_str())
            .with("mileage", self.mileage.as_str())
            .with("fuelType", self.fuel_type.as_str())
            .with("transmission", self.transmission.as_str())
            .with("location", self.location.as_str())
            .with("description", self.description.as_str())
            .with("images", self.images.as_str())
            .with("whatsapp", self.whatsapp.as_str());
        if let Some(id) = &self.id {
            record.insert("id", id.as_str());
        }
        record
    }
}
