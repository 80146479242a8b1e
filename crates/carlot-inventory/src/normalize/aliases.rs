//! Accepted key aliases per canonical field.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// A canonical vehicle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    Brand,
    Model,
    Year,
    Price,
    Mileage,
    FuelType,
    Transmission,
    Location,
    Description,
    Images,
    Whatsapp,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 12] = [
        Field::Id,
        Field::Brand,
        Field::Model,
        Field::Year,
        Field::Price,
        Field::Mileage,
        Field::FuelType,
        Field::Transmission,
        Field::Location,
        Field::Description,
        Field::Images,
        Field::Whatsapp,
    ];

    /// Canonical key, which is also the first alias.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Year => "year",
            Field::Price => "price",
            Field::Mileage => "mileage",
            Field::FuelType => "fuelType",
            Field::Transmission => "transmission",
            Field::Location => "location",
            Field::Description => "description",
            Field::Images => "images",
            Field::Whatsapp => "whatsapp",
        }
    }

    fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Id => &["id", "ID", "Id"],
            Field::Brand => &["brand", "Brand"],
            Field::Model => &["model", "Model"],
            Field::Year => &["year", "Year"],
            Field::Price => &["price", "Price"],
            Field::Mileage => &["mileage", "Mileage"],
            Field::FuelType => &["fuelType", "FuelType", "fuel_type"],
            Field::Transmission => &["transmission", "Transmission"],
            Field::Location => &["location", "Location"],
            Field::Description => &["description", "Description"],
            Field::Images => &["images", "Images", "IMAGES", "image", "Image"],
            Field::Whatsapp => &["whatsapp", "WhatsApp"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| InventoryError::UnknownField(s.to_string()))
    }
}

/// Ordered list of accepted keys for each field.
///
/// Matching is case-sensitive: every accepted spelling is listed
/// explicitly. The first alias holding a usable value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<Field, Vec<String>>,
}

impl AliasTable {
    /// Keys accepted for a field, in priority order.
    pub fn aliases(&self, field: Field) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the aliases of one field.
    pub fn with_aliases<I, S>(mut self, field: Field, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .insert(field, aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Apply a set of per-field overrides, e.g. from configuration.
    pub fn with_overrides(self, overrides: &HashMap<Field, Vec<String>>) -> Self {
        overrides
            .iter()
            .fold(self, |table, (field, aliases)| {
                table.with_aliases(*field, aliases.iter().cloned())
            })
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        let aliases = Field::ALL
            .into_iter()
            .map(|field| {
                let keys = field.default_aliases().iter().map(|s| s.to_string()).collect();
                (field, keys)
            })
            .collect();
        Self { aliases }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_alias_is_canonical_key() {
        let table = AliasTable::default();
        for field in Field::ALL {
            assert_eq!(table.aliases(field)[0], field.as_str());
        }
    }

    #[test]
    fn test_default_image_aliases() {
        let table = AliasTable::default();
        assert_eq!(
            table.aliases(Field::Images),
            &["images", "Images", "IMAGES", "image", "Image"]
        );
    }

    #[test]
    fn test_default_contact_aliases() {
        let table = AliasTable::default();
        assert_eq!(table.aliases(Field::Whatsapp), &["whatsapp", "WhatsApp"]);
    }

    #[test]
    fn test_with_aliases_replaces_one_field() {
        let table = AliasTable::default().with_aliases(Field::Images, ["Photos"]);
        assert_eq!(table.aliases(Field::Images), &["Photos"]);
        assert_eq!(table.aliases(Field::Brand), &["brand", "Brand"]);
    }

    #[test]
    fn test_with_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(Field::Price, vec!["Asking".to_string(), "price".to_string()]);

        let table = AliasTable::default().with_overrides(&overrides);
        assert_eq!(table.aliases(Field::Price), &["Asking", "price"]);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("fuelType".parse::<Field>().unwrap(), Field::FuelType);
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_deserializes_camel_case() {
        let field: Field = serde_json::from_str("\"fuelType\"").unwrap();
        assert_eq!(field, Field::FuelType);
    }
}
