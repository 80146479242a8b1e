//! CLI configuration.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use carlot_inventory::{AliasTable, Field};
use carlot_sync::FetchPolicy;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["carlot.toml", ".carlot.toml", "carlot.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the catalog is read from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Remote sheet fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Per-field alias overrides, keyed by canonical field name.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Alias overrides with field names resolved.
    pub fn alias_overrides(&self) -> Result<HashMap<Field, Vec<String>>> {
        self.aliases
            .iter()
            .map(|(name, aliases)| {
                let field: Field = name
                    .parse()
                    .with_context(|| format!("Invalid [aliases] entry '{}'", name))?;
                Ok((field, aliases.clone()))
            })
            .collect()
    }

    /// Default alias table with this config's overrides applied.
    pub fn alias_table(&self) -> Result<AliasTable> {
        Ok(AliasTable::default().with_overrides(&self.alias_overrides()?))
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::from_settings(self.fetch.timeout_ms, self.fetch.max_retries)
    }
}

/// Kind of catalog source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The local document store, which admin commands also write to.
    #[default]
    Store,
    /// A CSV sheet, from `sheet_url` or `sheet_path`.
    Sheet,
}

/// Source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// JSON document store file.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Published CSV URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_url: Option<String>,

    /// Local CSV file, used when no URL is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_path: Option<String>,
}

fn default_store_path() -> String {
    "inventory.json".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            store_path: default_store_path(),
            sheet_url: None,
            sheet_path: None,
        }
    }
}

/// Fetch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Generate a default carlot.toml config file.
pub fn generate_default_config() -> String {
    r#"# carlot storefront configuration

[source]
# "store" reads the local document store, "sheet" imports a CSV export
kind = "store"
store_path = "inventory.json"
# sheet_url = "https://docs.google.com/spreadsheets/d/<id>/pub?output=csv"
# sheet_path = "inventory.csv"

[fetch]
timeout_ms = 10000
max_retries = 2

[aliases]
# images = ["images", "Images", "Photos"]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
[source]
kind = "sheet"
sheet_path = "cars.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.source.kind, SourceKind::Sheet);
        assert_eq!(config.source.store_path, "inventory.json");
        assert_eq!(config.source.sheet_path.as_deref(), Some("cars.csv"));
        assert_eq!(config.fetch.max_retries, 2);
    }

    #[test]
    fn test_alias_overrides() {
        let config: CliConfig = toml::from_str(
            r#"
[aliases]
images = ["Photos"]
fuelType = ["Fuel"]
"#,
        )
        .unwrap();

        let table = config.alias_table().unwrap();
        assert_eq!(table.aliases(Field::Images), ["Photos".to_string()]);
        assert_eq!(table.aliases(Field::FuelType), ["Fuel".to_string()]);
        assert_eq!(table.aliases(Field::Brand)[0], "brand");
    }

    #[test]
    fn test_unknown_alias_field_rejected() {
        let mut config = CliConfig::default();
        config
            .aliases
            .insert("colour".to_string(), vec!["Colour".to_string()]);
        assert!(config.alias_table().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carlot.json");
        std::fs::write(&path, r#"{ "fetch": { "timeout_ms": 2500 } }"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.fetch.timeout_ms, 2500);
        assert_eq!(config.fetch.max_retries, 2);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let err = CliConfig::load("/no/such/carlot.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/carlot.toml"));
    }
}
