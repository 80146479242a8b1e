//! The canonical vehicle listing.

use crate::ids::VehicleId;
use crate::normalize::RawRecord;
use serde::{Deserialize, Serialize};

/// Brand shown when a record carries none.
pub const UNNAMED_BRAND: &str = "unnamed brand";

/// A vehicle listing after normalization.
///
/// Every field is populated: numeric fields are always numbers and
/// `images` only holds trimmed, non-empty URLs. Serialized keys use the
/// same camelCase names the normalizer accepts as primary aliases, so a
/// serialized vehicle is itself a valid raw record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique listing identifier.
    pub id: VehicleId,
    /// Manufacturer, e.g. "Toyota".
    pub brand: String,
    /// Model line, e.g. "RAV4 Adventure".
    pub model: String,
    /// Model year, `0` when unknown.
    pub year: i32,
    /// Asking price, `0` when unknown.
    pub price: f64,
    /// Odometer reading in kilometres.
    pub mileage: f64,
    pub fuel_type: String,
    pub transmission: String,
    /// City the vehicle is shown in.
    pub location: String,
    pub description: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Seller contact handle, typically an international phone number.
    pub whatsapp: String,
}

impl Vehicle {
    /// Create a vehicle with every optional field at its default.
    pub fn new(id: VehicleId, brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            brand: brand.into(),
            model: model.into(),
            year: 0,
            price: 0.0,
            mileage: 0.0,
            fuel_type: String::new(),
            transmission: String::new(),
            location: String::new(),
            description: String::new(),
            images: Vec::new(),
            whatsapp: String::new(),
        }
    }

    /// "Brand Model", as shown on listing cards.
    pub fn headline(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }

    /// First image, used as the card thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Text matched by free-text search: brand, model and location.
    pub fn search_text(&self) -> String {
        [self.brand.as_str(), self.model.as_str(), self.location.as_str()].join(" ")
    }

    /// Convert back into a raw record keyed by the primary aliases.
    pub fn to_record(&self) -> RawRecord {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => RawRecord::from(map),
            _ => RawRecord::default(),
        }
    }
}
