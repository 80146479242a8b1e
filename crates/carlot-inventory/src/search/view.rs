//! Filtered catalog view.

use serde::Serialize;

use crate::catalog::Vehicle;
use crate::search::{brand_facet, year_facet, Facet, VehicleFilter};

/// What the storefront renders for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    /// Matching vehicles in collection order.
    pub vehicles: Vec<&'a Vehicle>,
    /// Size of the whole collection.
    pub total: usize,
    pub brands: Facet,
    pub years: Facet,
}

impl<'a> CatalogView<'a> {
    /// Evaluate a filter against a collection snapshot.
    pub fn build(collection: &'a [Vehicle], filter: &VehicleFilter) -> Self {
        Self {
            vehicles: filter.apply(collection),
            total: collection.len(),
            brands: brand_facet(collection, filter),
            years: year_facet(collection, filter),
        }
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Number of matching vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }
}
