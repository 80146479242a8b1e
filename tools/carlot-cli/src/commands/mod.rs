//! CLI command implementations.

pub mod admin;
pub mod config;
pub mod contact;
pub mod facets;
pub mod import;
pub mod list;
pub mod show;
pub mod watch;

use anyhow::Result;
use carlot_inventory::search::FilterField;
use carlot_inventory::{VehicleFilter, VehicleForm, VehicleId};
use clap::{Args, Subcommand};

/// Catalog filter flags shared by the browsing commands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Exact brand, or "all".
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Exact model year, or "all".
    #[arg(short, long)]
    pub year: Option<String>,

    /// Case-insensitive model substring.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Inclusive price range "MIN-MAX", or "all".
    #[arg(short, long)]
    pub price: Option<String>,

    /// Case-insensitive search over brand, model and location.
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build the filter from the flags that were given.
    pub fn to_filter(&self) -> Result<VehicleFilter> {
        let inputs = [
            (FilterField::Brand, &self.brand),
            (FilterField::Year, &self.year),
            (FilterField::Model, &self.model),
            (FilterField::Price, &self.price),
            (FilterField::Search, &self.search),
        ];

        let mut filter = VehicleFilter::new();
        for (field, value) in inputs {
            if let Some(value) = value {
                filter = filter.with_field(field, value)?;
            }
        }
        Ok(filter)
    }
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Vehicle ID.
    pub id: String,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    /// Vehicle ID.
    pub id: String,

    /// Ask to book a viewing instead of a general inquiry.
    #[arg(long)]
    pub viewing: bool,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file path or URL (default: source.sheet_url / source.sheet_path).
    pub source: Option<String>,

    /// Parse and report without writing the store.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List stored vehicles.
    List,
    /// Create a vehicle, or edit one when --id names an existing listing.
    Save(SaveArgs),
    /// Delete a vehicle.
    Delete {
        /// Vehicle ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form fields for the admin save command.
///
/// When editing, fields left out keep their current value.
#[derive(Args, Debug, Default)]
pub struct SaveArgs {
    /// ID of the listing to edit or create.
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub mileage: Option<String>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Comma-separated image URLs.
    #[arg(long)]
    pub images: Option<String>,
    /// Seller's WhatsApp number.
    #[arg(long)]
    pub whatsapp: Option<String>,
}

impl SaveArgs {
    /// Overwrite the form fields that were given on the command line.
    pub fn apply_to(self, form: &mut VehicleForm) {
        if let Some(id) = self.id {
            form.id = Some(VehicleId::new(id));
        }
        let fields = [
            (&mut form.brand, self.brand),
            (&mut form.model, self.model),
            (&mut form.year, self.year),
            (&mut form.price, self.price),
            (&mut form.mileage, self.mileage),
            (&mut form.fuel_type, self.fuel_type),
            (&mut form.transmission, self.transmission),
            (&mut form.location, self.location),
            (&mut form.description, self.description),
            (&mut form.images, self.images),
            (&mut form.whatsapp, self.whatsapp),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Poll interval in milliseconds.
    #[arg(long, default_value = "1000")]
    pub interval_ms: u64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_inventory::search::{PriceRange, Selection};

    #[test]
    fn test_filter_args_build_filter() {
        let args = FilterArgs {
            brand: Some("Honda".to_string()),
            price: Some("15000-25000".to_string()),
            ..Default::default()
        };

        let filter = args.to_filter().unwrap();
        assert_eq!(filter.brand, Selection::Only("Honda".to_string()));
        assert_eq!(filter.price, Selection::Only(PriceRange::new(15000.0, 25000.0)));
        assert!(filter.year.is_all());
    }

    #[test]
    fn test_filter_args_reject_bad_year() {
        let args = FilterArgs {
            year: Some("twenty".to_string()),
            ..Default::default()
        };
        assert!(args.to_filter().is_err());
    }

    #[test]
    fn test_save_args_keep_unset_fields() {
        let mut form = VehicleForm {
            brand: "BMW".to_string(),
            price: "31800".to_string(),
            ..Default::default()
        };

        SaveArgs {
            price: Some("29900".to_string()),
            ..Default::default()
        }
        .apply_to(&mut form);

        assert_eq!(form.brand, "BMW");
        assert_eq!(form.price, "29900");
        assert!(form.id.is_none());
    }
}
