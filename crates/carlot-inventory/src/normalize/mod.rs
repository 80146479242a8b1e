//! Normalization module.
//!
//! Turns raw records from any source into canonical vehicles using one
//! alias-driven rule set.

mod aliases;
mod form;
mod normalizer;
mod record;

pub use aliases::{AliasTable, Field};
pub use form::VehicleForm;
pub use normalizer::Normalizer;
pub use record::RawRecord;
