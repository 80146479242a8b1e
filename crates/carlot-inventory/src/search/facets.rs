//! Facets for populating filter selectors.
//!
//! Facets are always derived from the collection passed in; nothing is
//! cached between calls.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::Vehicle;
use crate::search::VehicleFilter;

/// A facet for one filter selector.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Facet {
    /// Filter input this facet feeds ("brand", "year").
    pub field: String,
    /// Distinct values in display order.
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// The distinct values without counts.
    pub fn value_strings(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.value.as_str()).collect()
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Number of vehicles in the collection with this value.
    pub count: usize,
    /// Whether the current filter selects this value.
    pub selected: bool,
}

/// Distinct brands in first-seen order.
pub fn distinct_brands(vehicles: &[Vehicle]) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();
    for vehicle in vehicles {
        if !brands.contains(&vehicle.brand) {
            brands.push(vehicle.brand.clone());
        }
    }
    brands
}

/// Distinct model years, newest first.
pub fn distinct_years(vehicles: &[Vehicle]) -> Vec<i32> {
    let mut years: Vec<i32> = vehicles.iter().map(|v| v.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Brand facet with counts and the filter's selection marked.
pub fn brand_facet(vehicles: &[Vehicle], filter: &VehicleFilter) -> Facet {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for vehicle in vehicles {
        *counts.entry(vehicle.brand.as_str()).or_default() += 1;
    }

    let mut facet = Facet::new("brand");
    for brand in distinct_brands(vehicles) {
        let count = counts.get(brand.as_str()).copied().unwrap_or(0);
        let selected = filter.brand.as_option() == Some(&brand);
        facet.add_value(brand, count, selected);
    }
    facet
}

/// Year facet with counts and the filter's selection marked.
pub fn year_facet(vehicles: &[Vehicle], filter: &VehicleFilter) -> Facet {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for vehicle in vehicles {
        *counts.entry(vehicle.year).or_default() += 1;
    }

    let mut facet = Facet::new("year");
    for year in distinct_years(vehicles) {
        let count = counts.get(&year).copied().unwrap_or(0);
        let selected = filter.year.as_option() == Some(&year);
        facet.add_value(year.to_string(), count, selected);
    }
    facet
}
