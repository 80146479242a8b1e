//! Catalog filter types.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::catalog::Vehicle;
use crate::error::InventoryError;
use crate::search::PriceRange;

/// Wildcard text accepted by selector filters.
pub const WILDCARD: &str = "all";

/// A selector that either passes everything or one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    /// Wildcard: every vehicle passes.
    All,
    /// Only vehicles with this value pass.
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Test a value against the selection.
    pub fn admits(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => test(value),
        }
    }

    /// Parse selector text, treating `all` and blank input as the wildcard.
    pub fn parse_with<E>(s: &str, parse: impl FnOnce(&str) -> Result<T, E>) -> Result<Self, E> {
        let s = s.trim();
        if s.is_empty() || s == WILDCARD {
            Ok(Selection::All)
        } else {
            parse(s).map(Selection::Only)
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(WILDCARD),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Name of one filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Brand,
    Year,
    Model,
    Price,
    Search,
}

impl FromStr for FilterField {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(FilterField::Brand),
            "year" => Ok(FilterField::Year),
            "model" => Ok(FilterField::Model),
            "price" => Ok(FilterField::Price),
            "search" => Ok(FilterField::Search),
            other => Err(InventoryError::UnknownField(other.to_string())),
        }
    }
}

/// The catalog filter.
///
/// All dimensions combine with AND. The default value is the reset state:
/// every selector on the wildcard and both text inputs empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleFilter {
    /// Exact brand.
    pub brand: Selection<String>,
    /// Exact model year.
    pub year: Selection<i32>,
    /// Case-insensitive substring of the model.
    pub model: String,
    /// Inclusive price range.
    pub price: Selection<PriceRange>,
    /// Case-insensitive substring of "brand model location".
    pub search: String,
}

impl VehicleFilter {
    /// Unfiltered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the unfiltered state.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Whether no dimension restricts the result.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Selection::Only(brand.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Selection::Only(year);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Selection::Only(range);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// New filter with one input changed from its text value.
    ///
    /// Selectors accept `all` for the wildcard; text inputs take the value
    /// as typed.
    pub fn with_field(&self, field: FilterField, value: &str) -> Result<Self, InventoryError> {
        let mut next = self.clone();
        match field {
            FilterField::Brand => {
                next.brand = Selection::parse_with(value, |s| {
                    Ok::<_, InventoryError>(s.to_string())
                })?;
            }
            FilterField::Year => {
                next.year = Selection::parse_with(value, |s| {
                    s.parse::<i32>()
                        .map_err(|_| InventoryError::InvalidYear(s.to_string()))
                })?;
            }
            FilterField::Model => next.model = value.to_string(),
            FilterField::Price => {
                next.price = Selection::parse_with(value, |s| s.parse::<PriceRange>())?;
            }
            FilterField::Search => next.search = value.to_string(),
        }
        Ok(next)
    }

    /// Whether a vehicle passes every dimension.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.brand.admits(|brand| vehicle.brand == *brand)
            && self.year.admits(|year| vehicle.year == *year)
            && contains_ignore_case(&vehicle.model, &self.model)
            && self.price.admits(|range| range.contains(vehicle.price))
            && contains_ignore_case(&vehicle.search_text(), &self.search)
    }

    /// Matching vehicles in collection order.
    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        vehicles.iter().filter(|v| self.matches(v)).collect()
    }
}

/// Empty needles match everything.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_vehicles;
    use crate::ids::VehicleId;

    fn brands(matches: &[&Vehicle]) -> Vec<String> {
        matches.iter().map(|v| v.brand.clone()).collect()
    }

    fn fleet() -> Vec<Vehicle> {
        let mut fleet = Vec::new();
        for (id, brand, year) in [
            ("a", "Toyota", 2019),
            ("b", "BMW", 2020),
            ("c", "Toyota", 2020),
            ("d", "BMW", 2019),
            ("e", "Toyota", 2020),
        ] {
            let mut v = Vehicle::new(VehicleId::new(id), brand, "X");
            v.year = year;
            fleet.push(v);
        }
        fleet
    }

    #[test]
    fn test_unfiltered_returns_everything_in_order() {
        let fleet = fleet();
        let ids: Vec<&str> = VehicleFilter::new()
            .apply(&fleet)
            .into_iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_brand_and_year_combine() {
        let fleet = fleet();
        let filter = VehicleFilter::new().with_brand("Toyota").with_year(2020);
        let ids: Vec<&str> = filter.apply(&fleet).into_iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "e"]);
    }

    #[test]
    fn test_brand_is_exact() {
        let fleet = fleet();
        assert!(VehicleFilter::new().with_brand("toyota").apply(&fleet).is_empty());
    }

    #[test]
    fn test_model_is_case_insensitive_substring() {
        let seed = seed_vehicles();
        let found = VehicleFilter::new().with_model("m SPORT").apply(&seed);
        assert_eq!(brands(&found), vec!["BMW"]);
    }

    #[test]
    fn test_search_covers_location() {
        let seed = seed_vehicles();
        let found = VehicleFilter::new().with_search("hong kong").apply(&seed);
        assert_eq!(brands(&found), vec!["Tesla"]);
    }

    #[test]
    fn test_search_spans_joined_fields() {
        let seed = seed_vehicles();
        let found = VehicleFilter::new().with_search("hatchback macau").apply(&seed);
        assert_eq!(brands(&found), vec!["Honda"]);
    }

    #[test]
    fn test_price_range() {
        let seed = seed_vehicles();
        let found = VehicleFilter::new()
            .with_price(PriceRange::new(15000.0, 25000.0))
            .apply(&seed);
        assert_eq!(brands(&found), vec!["Honda"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let seed = seed_vehicles();
        let filter = VehicleFilter::new().with_brand("Tesla").with_year(1999);
        assert!(filter.apply(&seed).is_empty());
    }

    #[test]
    fn test_with_field_parses_text() {
        let filter = VehicleFilter::new()
            .with_field(FilterField::Brand, "BMW")
            .unwrap()
            .with_field(FilterField::Year, "2019")
            .unwrap()
            .with_field(FilterField::Price, "25000-1000000")
            .unwrap();

        assert_eq!(filter.brand, Selection::Only("BMW".to_string()));
        assert_eq!(filter.year, Selection::Only(2019));
        assert_eq!(brands(&filter.apply(&seed_vehicles())), vec!["BMW"]);
    }

    #[test]
    fn test_with_field_wildcard() {
        let filter = VehicleFilter::new()
            .with_year(2020)
            .with_field(FilterField::Year, "all")
            .unwrap();
        assert!(filter.year.is_all());
    }

    #[test]
    fn test_with_field_rejects_bad_input() {
        let filter = VehicleFilter::new();
        assert_eq!(
            filter.with_field(FilterField::Year, "recent"),
            Err(InventoryError::InvalidYear("recent".to_string()))
        );
        assert!(filter.with_field(FilterField::Price, "cheap").is_err());
    }

    #[test]
    fn test_reset() {
        let filter = VehicleFilter::new().with_brand("BMW").with_search("x");
        assert!(!filter.is_unfiltered());
        assert!(filter.reset().is_unfiltered());
    }

    #[test]
    fn test_filter_field_from_str() {
        assert_eq!("search".parse::<FilterField>().unwrap(), FilterField::Search);
        assert!("colour".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_serializes_wildcards_as_all() {
        let json = serde_json::to_value(VehicleFilter::new().with_year(2020)).unwrap();
        assert_eq!(json["brand"], "all");
        assert_eq!(json["year"], "2020");
    }
}
