//! Catalog loading
//!
//! Descriptors are loaded from TOML files in two locations:
//! - **Builtin**: shipped with the application (read-only)
//! - **Custom**: user-created overrides (editable)
//!
//! Builtin files load first; a custom descriptor with the same id replaces
//! the builtin one in place, keeping its declaration position.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use super::definitions::{ActionDescriptor, AlertDescriptor, CatalogConfig};

/// Read-only descriptor lookup consumed by the codec
pub trait CatalogSource {
    fn lookup(&self, id: &str) -> Option<Arc<AlertDescriptor>>;

    /// Every alert descriptor, in declaration order
    fn all_descriptors(&self) -> Vec<Arc<AlertDescriptor>>;
}

/// All loaded alert and action descriptors
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    alerts: HashMap<String, Arc<AlertDescriptor>>,
    /// Alert ids in declaration order
    alert_order: Vec<String>,

    actions: HashMap<String, Arc<ActionDescriptor>>,
    action_order: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a parsed config into the catalog.
    ///
    /// Duplicates replace the earlier entry. Alerts with an inverted
    /// severity range are skipped. Both are reported in the returned list.
    pub fn add_config(&mut self, config: CatalogConfig) -> Vec<CatalogError> {
        let mut problems = Vec::new();

        for alert in config.alerts {
            if let Some((min, max)) = alert.severity_range() {
                if max < min {
                    problems.push(CatalogError::InvalidSeverityRange {
                        id: alert.id.clone(),
                        min,
                        max,
                    });
                    continue;
                }
            }
            if self.alerts.contains_key(&alert.id) {
                problems.push(CatalogError::DuplicateId(alert.id.clone()));
            } else {
                self.alert_order.push(alert.id.clone());
            }
            self.alerts.insert(alert.id.clone(), Arc::new(alert));
        }

        for action in config.actions {
            if self.actions.contains_key(&action.id) {
                problems.push(CatalogError::DuplicateId(action.id.clone()));
            } else {
                self.action_order.push(action.id.clone());
            }
            self.actions.insert(action.id.clone(), Arc::new(action));
        }

        problems
    }

    /// Get an alert descriptor by id
    pub fn alert(&self, id: &str) -> Option<&Arc<AlertDescriptor>> {
        self.alerts.get(id)
    }

    /// Get an action descriptor by id
    pub fn action(&self, id: &str) -> Option<&Arc<ActionDescriptor>> {
        self.actions.get(id)
    }

    pub fn alerts(&self) -> impl Iterator<Item = &Arc<AlertDescriptor>> {
        self.alert_order.iter().filter_map(|id| self.alerts.get(id))
    }

    pub fn actions(&self) -> impl Iterator<Item = &Arc<ActionDescriptor>> {
        self.action_order.iter().filter_map(|id| self.actions.get(id))
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty() && self.actions.is_empty()
    }
}

impl CatalogSource for Catalog {
    fn lookup(&self, id: &str) -> Option<Arc<AlertDescriptor>> {
        self.alerts.get(id).cloned()
    }

    fn all_descriptors(&self) -> Vec<Arc<AlertDescriptor>> {
        self.alerts().cloned().collect()
    }
}

/// Load the catalog from builtin and custom directories
///
/// Missing directories are skipped. Unreadable or malformed files are
/// logged and skipped so one bad file never hides the rest of the catalog.
pub fn load_catalog(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    if let Some(dir) = builtin_dir {
        if dir.exists() {
            load_directory(&mut catalog, dir, "builtin")?;
        }
    }

    if let Some(dir) = custom_dir {
        if dir.exists() {
            load_directory(&mut catalog, dir, "custom")?;
        }
    }

    tracing::info!(
        alerts = catalog.alert_count(),
        actions = catalog.action_count(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Load all TOML files from a directory, in file name order
fn load_directory(catalog: &mut Catalog, dir: &Path, source: &str) -> Result<(), CatalogError> {
    let entries = fs::read_dir(dir).map_err(|e| CatalogError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_file(&path) {
            Ok(config) => {
                for problem in catalog.add_config(config) {
                    match problem {
                        CatalogError::DuplicateId(id) => {
                            tracing::debug!(source, file = ?path.file_name(), %id, "Overriding descriptor");
                        }
                        problem => {
                            tracing::warn!(source, file = ?path.file_name(), error = %problem, "Catalog entry issue");
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(source, file = ?path.file_name(), error = %e, "Failed to load catalog file");
            }
        }
    }

    Ok(())
}

/// Load a single catalog file
pub fn load_file(path: &Path) -> Result<CatalogConfig, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a catalog file (used for user overrides)
pub fn save_file(path: &Path, config: &CatalogConfig) -> Result<(), CatalogError> {
    let contents = toml::to_string_pretty(config).map_err(|e| CatalogError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Default builtin catalog directory (next to the executable)
pub fn default_builtin_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("catalog")))
}

/// Default custom catalog directory
pub fn default_custom_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hudsync").join("catalog"))
}

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("alert {id:?} has max_severity {max} below min_severity {min}")]
    InvalidSeverityRange { id: String, min: i16, max: i16 },

    #[error("duplicate descriptor id {0:?}")]
    DuplicateId(String),
}
