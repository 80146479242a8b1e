//! Inventory core for the carlot used-car storefront.
//!
//! - **Catalog**: the canonical [`Vehicle`], the sample listings, and the
//!   held [`Inventory`]
//! - **Normalize**: one alias-driven [`Normalizer`] for spreadsheet rows,
//!   document snapshots and admin form submissions
//! - **Search**: [`VehicleFilter`], price ranges, facets, [`CatalogView`]
//! - **Contact**: WhatsApp deep links
//!
//! # Example
//!
//! ```rust
//! use carlot_inventory::prelude::*;
//!
//! let row = RawRecord::new()
//!     .with("Brand", "Honda")
//!     .with("model", "Jazz")
//!     .with("price", "12500")
//!     .with("Images", "a.jpg, b.jpg");
//!
//! let mut inventory = Inventory::seeded();
//! inventory.upsert(Normalizer::default().normalize(&row));
//!
//! let filter = VehicleFilter::new().with_brand("Honda");
//! let view = CatalogView::build(inventory.as_slice(), &filter);
//! assert_eq!(view.len(), 2);
//! ```

pub mod catalog;
pub mod contact;
pub mod error;
pub mod ids;
pub mod normalize;
pub mod search;

pub use catalog::{Inventory, Upsert, Vehicle};
pub use error::InventoryError;
pub use ids::VehicleId;
pub use normalize::{AliasTable, Field, Normalizer, RawRecord, VehicleForm};
pub use search::{CatalogView, VehicleFilter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{seed_vehicles, Inventory, Upsert, Vehicle, UNNAMED_BRAND};
    pub use crate::contact::{whatsapp_link, ContactIntent};
    pub use crate::error::InventoryError;
    pub use crate::ids::VehicleId;
    pub use crate::normalize::{AliasTable, Field, Normalizer, RawRecord, VehicleForm};
    pub use crate::search::{
        CatalogView, Facet, FacetValue, FilterField, PriceRange, Selection, VehicleFilter,
        PRICE_BANDS,
    };
}
