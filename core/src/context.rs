//! Application context
//!
//! Persisted [`HudConfig`] plus the immutable catalog and codec services
//! built from it. Services are constructed once here and handed to the
//! views; nothing is global.

use std::path::PathBuf;
use std::sync::Arc;

use hudsync_types::HudConfig;

use crate::alerts::AlertsView;
use crate::catalog::{
    Catalog, CatalogError, default_builtin_dir, default_custom_dir, load_catalog,
};
use crate::client::HudClient;
use crate::codec::AlertCodec;
use crate::hotbar::Hotbar;
use crate::toolkit::AlertToolkit;

/// Name used for the confy config file and the user catalog directory
pub const APP_NAME: &str = "hudsync";

/// Load the persisted config, falling back to defaults if it can't be read
pub fn load_config() -> HudConfig {
    match confy::load::<HudConfig>(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            HudConfig::default()
        }
    }
}

pub fn save_config(config: &HudConfig) -> Result<(), confy::ConfyError> {
    confy::store(APP_NAME, None, config)
}

/// Location of the persisted config file
pub fn config_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}

/// Builtin catalog directory: config override, else next to the executable
pub fn builtin_catalog_dir(config: &HudConfig) -> Option<PathBuf> {
    config.builtin_catalog_dir.clone().or_else(default_builtin_dir)
}

/// User catalog directory: config override, else the platform config dir
pub fn custom_catalog_dir(config: &HudConfig) -> Option<PathBuf> {
    config.custom_catalog_dir.clone().or_else(default_custom_dir)
}

/// Config plus the shared catalog and codec
#[derive(Debug, Clone)]
pub struct HudContext {
    config: HudConfig,
    catalog: Arc<Catalog>,
    codec: Arc<AlertCodec>,
}

impl HudContext {
    pub fn new(config: HudConfig, catalog: Catalog) -> Self {
        let codec = Arc::new(AlertCodec::new(&catalog));
        Self {
            config,
            catalog: Arc::new(catalog),
            codec,
        }
    }

    /// Load the catalog from the directories the config points at
    pub fn load(config: HudConfig) -> Result<Self, CatalogError> {
        let builtin = builtin_catalog_dir(&config);
        let custom = custom_catalog_dir(&config);
        let catalog = load_catalog(builtin.as_deref(), custom.as_deref())?;
        Ok(Self::new(config, catalog))
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn codec(&self) -> &Arc<AlertCodec> {
        &self.codec
    }

    pub fn alerts_view<T: AlertToolkit>(&self, toolkit: T) -> AlertsView<T> {
        AlertsView::with_config(Arc::clone(&self.codec), toolkit, &self.config)
    }

    pub fn hotbar(&self) -> Hotbar {
        Hotbar::new(self.config.hotbar_slots)
    }

    pub fn client<T: AlertToolkit>(&self, toolkit: T) -> HudClient<T> {
        HudClient::new(self.alerts_view(toolkit), self.hotbar())
    }
}
