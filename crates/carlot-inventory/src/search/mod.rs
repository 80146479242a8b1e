//! Search module.
//!
//! Contains the catalog filter, price ranges, facets and the combined view.

mod facets;
mod filter;
mod price;
mod view;

pub use facets::{brand_facet, distinct_brands, distinct_years, year_facet, Facet, FacetValue};
pub use filter::{FilterField, Selection, VehicleFilter, WILDCARD};
pub use price::{PriceBand, PriceRange, PRICE_BANDS};
pub use view::CatalogView;
