//! HUD configuration
//!
//! Persisted with `confy` by the core crate; every field has a default so a
//! missing or partial config file still loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How newly created alert elements are positioned among existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertOrdering {
    /// Keep elements in catalog declaration order
    #[default]
    Catalog,
    /// Append new elements after everything already shown
    Arrival,
}

/// User-facing HUD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Placement policy for new alert elements
    pub alert_ordering: AlertOrdering,

    /// Maximum tooltip text width in pixels
    pub tooltip_max_width: f32,

    /// Number of hotbar slots (labels stop after 10)
    pub hotbar_slots: u8,

    /// Swap `.` and `,` in formatted numbers
    pub european_number_format: bool,

    /// Directory holding the shipped catalog files (None = next to the executable)
    pub builtin_catalog_dir: Option<PathBuf>,

    /// Directory holding user catalog overrides (None = platform config dir)
    pub custom_catalog_dir: Option<PathBuf>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            alert_ordering: AlertOrdering::Catalog,
            tooltip_max_width: 265.0,
            hotbar_slots: 10,
            european_number_format: false,
            builtin_catalog_dir: None,
            custom_catalog_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: HudConfig = toml::from_str(r#"alert_ordering = "arrival""#).unwrap();
        assert_eq!(config.alert_ordering, AlertOrdering::Arrival);
        assert_eq!(config.hotbar_slots, 10);
        assert_eq!(config.tooltip_max_width, 265.0);
        assert!(config.builtin_catalog_dir.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = HudConfig {
            european_number_format: true,
            custom_catalog_dir: Some(PathBuf::from("/tmp/catalog")),
            ..HudConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: HudConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
