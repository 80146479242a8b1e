//! Raw record to canonical vehicle conversion.

use serde_json::Value;
use tracing::debug;

use crate::catalog::{Vehicle, UNNAMED_BRAND};
use crate::ids::VehicleId;
use crate::normalize::aliases::{AliasTable, Field};
use crate::normalize::record::{coerce_images, coerce_number, scalar_text, RawRecord};

/// Single entry point for turning external records into vehicles.
///
/// Spreadsheet rows, document snapshots and admin submissions all pass
/// through the same rules. Normalization never fails: anything missing or
/// unparseable takes the field's default.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
}

impl Normalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Normalize a record that carries no external object id.
    pub fn normalize(&self, record: &RawRecord) -> Vehicle {
        self.build(record, None)
    }

    /// Normalize a document, falling back to its object id when the
    /// record has no id field of its own.
    pub fn normalize_document(&self, object_id: &str, record: &RawRecord) -> Vehicle {
        self.build(record, Some(object_id))
    }

    /// Normalize one import row, or `None` when it has neither a brand
    /// nor a model.
    pub fn normalize_row(&self, record: &RawRecord) -> Option<Vehicle> {
        let brand = self.text(record, Field::Brand);
        let model = self.text(record, Field::Model);
        if brand.is_none() && model.is_none() {
            return None;
        }
        Some(self.build(record, None))
    }

    /// Normalize a batch of import rows, dropping incomplete ones.
    pub fn normalize_batch<'a, I>(&self, rows: I) -> Vec<Vehicle>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut dropped = 0usize;
        let vehicles: Vec<Vehicle> = rows
            .into_iter()
            .filter_map(|row| {
                let vehicle = self.normalize_row(row);
                if vehicle.is_none() {
                    dropped += 1;
                }
                vehicle
            })
            .collect();

        if dropped > 0 {
            debug!(kept = vehicles.len(), dropped, "dropped rows without brand or model");
        }
        vehicles
    }

    /// The id a record carries under any of the id aliases.
    pub fn record_id(&self, record: &RawRecord) -> Option<VehicleId> {
        self.text(record, Field::Id).map(VehicleId::from)
    }

    fn build(&self, record: &RawRecord, object_id: Option<&str>) -> Vehicle {
        let id = self
            .record_id(record)
            .or_else(|| {
                object_id
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(VehicleId::new)
            })
            .unwrap_or_else(VehicleId::generate);

        Vehicle {
            id,
            brand: self
                .text(record, Field::Brand)
                .unwrap_or_else(|| UNNAMED_BRAND.to_string()),
            model: self.text_or_empty(record, Field::Model),
            year: year_from(self.number(record, Field::Year)),
            price: self.number(record, Field::Price),
            mileage: self.number(record, Field::Mileage),
            fuel_type: self.text_or_empty(record, Field::FuelType),
            transmission: self.text_or_empty(record, Field::Transmission),
            location: self.text_or_empty(record, Field::Location),
            description: self.text_or_empty(record, Field::Description),
            images: self.images(record),
            whatsapp: self.text_or_empty(record, Field::Whatsapp),
        }
    }

    /// Values present under the field's aliases, in alias order.
    fn candidates<'r>(
        &'r self,
        record: &'r RawRecord,
        field: Field,
    ) -> impl Iterator<Item = &'r Value> + 'r {
        self.aliases
            .aliases(field)
            .iter()
            .filter_map(move |key| record.get(key))
    }

    /// First non-blank scalar among the aliases.
    fn text(&self, record: &RawRecord, field: Field) -> Option<String> {
        self.candidates(record, field).find_map(scalar_text)
    }

    fn text_or_empty(&self, record: &RawRecord, field: Field) -> String {
        self.text(record, field).unwrap_or_default()
    }

    fn number(&self, record: &RawRecord, field: Field) -> f64 {
        self.candidates(record, field)
            .find(|value| scalar_text(value).is_some())
            .map(coerce_number)
            .unwrap_or(0.0)
    }

    fn images(&self, record: &RawRecord) -> Vec<String> {
        self.candidates(record, Field::Images)
            .find(|value| match value {
                Value::Array(items) => !items.is_empty(),
                other => scalar_text(other).is_some(),
            })
            .map(coerce_images)
            .unwrap_or_default()
    }
}

fn year_from(value: f64) -> i32 {
    let year = value.trunc();
    if year >= i32::MIN as f64 && year <= i32::MAX as f64 {
        year as i32
    } else {
        0
    }
}
