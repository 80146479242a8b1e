//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use carlot_inventory::Normalizer;
use carlot_sync::{
    AdminSink, FileSheetSource, HttpSheetSource, InventoryController, JsonFileStore, SheetSource,
};

use crate::config::{CliConfig, SourceKind, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Normalizer using the configured alias table.
    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.config.alias_table()?))
    }

    /// The local document store, resolving ids with the configured aliases.
    pub fn store(&self) -> Result<JsonFileStore> {
        Ok(JsonFileStore::new(self.resolve_path(&self.config.source.store_path))
            .with_normalizer(self.normalizer()?))
    }

    /// Sheet source for an explicit location, or the configured one.
    ///
    /// Locations starting with `http://` or `https://` are fetched over
    /// HTTP, anything else is read as a local file.
    pub fn sheet_source(&self, location: Option<&str>) -> Result<Box<dyn SheetSource>> {
        let location = location
            .map(str::to_string)
            .or_else(|| self.config.source.sheet_url.clone())
            .or_else(|| self.config.source.sheet_path.clone());

        let Some(location) = location else {
            bail!("No sheet configured. Pass a file or URL, or set source.sheet_url in carlot.toml.");
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            let source = HttpSheetSource::new(location, self.config.fetch_policy())
                .context("Failed to set up HTTP client")?;
            Ok(Box::new(source))
        } else {
            Ok(Box::new(FileSheetSource::new(self.resolve_path(&location))))
        }
    }

    /// Controller loaded from the configured source.
    ///
    /// Admin writes go to the local store. Load failures leave the sample
    /// inventory in place and are reported as warnings.
    pub async fn controller(&self) -> Result<InventoryController> {
        let controller = match self.config.source.kind {
            SourceKind::Store => self.store_controller().await?,
            SourceKind::Sheet => {
                let mut controller = self.bare_controller()?;
                let source = self.sheet_source(None)?;
                self.output
                    .debug(&format!("Importing sheet {}", source.describe()));
                if let Err(e) = controller.import_sheet(source.as_ref()).await {
                    self.output.debug(&format!("Import failed: {}", e));
                }
                controller
            }
        };

        if let Some(advisory) = controller.advisory() {
            self.output.warn(advisory);
        }

        Ok(controller)
    }

    /// Controller loaded from the local store, whatever the configured
    /// source kind.
    pub async fn store_controller(&self) -> Result<InventoryController> {
        let store = self.store()?;
        self.output
            .debug(&format!("Loading store {}", store.path().display()));

        let mut controller = self.bare_controller()?;
        controller.attach_live(&store);
        controller.pump_live().await;
        controller.detach_live();
        Ok(controller)
    }

    fn bare_controller(&self) -> Result<InventoryController> {
        let store: Arc<dyn AdminSink> = Arc::new(self.store()?);
        Ok(InventoryController::new(self.normalizer()?).with_sink(store))
    }
}
