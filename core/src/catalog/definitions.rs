//! Alert and action descriptor types
//!
//! Descriptors are static entries loaded from TOML catalog files. They are
//! never mutated after load and are shared with rendered elements via `Arc`.

use serde::{Deserialize, Serialize};

use crate::alerts::AlertKey;
use crate::error::AlertError;

// ═══════════════════════════════════════════════════════════════════════════
// Alert Descriptors
// ═══════════════════════════════════════════════════════════════════════════

/// Static description of one alert (loaded from the catalog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDescriptor {
    /// Unique identifier (e.g., "human_health")
    pub id: String,

    /// Indicator slot this alert occupies; alerts sharing a category replace
    /// each other instead of stacking
    #[serde(default)]
    pub category: Option<String>,

    /// Tooltip title
    pub name: String,

    /// Tooltip body (may contain markup for the toolkit)
    #[serde(default)]
    pub description: String,

    /// Icon path; when a severity range is set the severity number is
    /// inserted before the extension (`human.png` -> `human3.png`)
    pub icon: String,

    // ─── Severity ───────────────────────────────────────────────────────────
    /// Lowest severity (None = single fixed icon)
    #[serde(default)]
    pub min_severity: Option<i16>,

    /// Highest severity (defaults to `min_severity`)
    #[serde(default)]
    pub max_severity: Option<i16>,
}

impl AlertDescriptor {
    /// Slot identity for this alert
    pub fn key(&self) -> AlertKey {
        AlertKey::new(self.category.as_deref(), Some(&self.id))
    }

    /// Inclusive severity range, if this alert has severity-specific icons
    pub fn severity_range(&self) -> Option<(i16, i16)> {
        let min = self.min_severity?;
        Some((min, self.max_severity.unwrap_or(min)))
    }

    pub fn supports_severity(&self) -> bool {
        self.min_severity.is_some()
    }

    /// Clamp a severity into this alert's range.
    ///
    /// Absent severity maps to the minimum. Alerts without a range always
    /// resolve to `None`.
    pub fn clamp_severity(&self, severity: Option<i16>) -> Option<i16> {
        let (min, max) = self.severity_range()?;
        let severity = severity.unwrap_or(min);
        if severity < min || severity > max {
            tracing::debug!(
                error = %AlertError::SeverityOutOfRange {
                    alert: self.id.clone(),
                    severity,
                    min,
                    max,
                },
                "Clamping alert severity"
            );
        }
        // Never panics, even on an inverted range
        Some(severity.max(min).min(max))
    }

    /// Icon to display for the given severity
    pub fn icon_path(&self, severity: Option<i16>) -> String {
        match self.clamp_severity(severity) {
            Some(severity) => insert_before_extension(&self.icon, severity),
            None => self.icon.clone(),
        }
    }
}

/// `dir/human.png` + 3 -> `dir/human3.png`; no extension appends the number
fn insert_before_extension(path: &str, severity: i16) -> String {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) => {
            let dot = file_start + dot;
            format!("{}{}{}", &path[..dot], severity, &path[dot..])
        }
        None => format!("{}{}", path, severity),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Action Descriptors
// ═══════════════════════════════════════════════════════════════════════════

/// How an action is performed once activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Fires immediately
    #[default]
    Instant,
    /// Flips between on and off
    Toggle,
    /// Requires a target location
    TargetPoint,
    /// Requires a target entity
    TargetEntity,
}

/// Static description of one hotbar action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub kind: ActionKind,

    /// Provided by an item rather than by the player directly
    #[serde(default)]
    pub item_action: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Config File Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, rename = "alert")]
    pub alerts: Vec<AlertDescriptor>,

    #[serde(default, rename = "action")]
    pub actions: Vec<ActionDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_health() -> AlertDescriptor {
        AlertDescriptor {
            id: "humanhealth".to_string(),
            category: Some("health".to_string()),
            name: "Health".to_string(),
            description: "[color=green]Green[/color] good. [color=red]Red[/color] bad.".to_string(),
            icon: "/Textures/Interface/StatusEffects/Human/human.rsi/human.png".to_string(),
            min_severity: Some(0),
            max_severity: Some(6),
        }
    }

    #[test]
    fn test_icon_path_by_severity() {
        let alert = human_health();
        let base = "/Textures/Interface/StatusEffects/Human/human.rsi/";
        assert_eq!(alert.icon_path(Some(0)), format!("{base}human0.png"));
        assert_eq!(alert.icon_path(None), format!("{base}human0.png"));
        assert_eq!(alert.icon_path(Some(1)), format!("{base}human1.png"));
        assert_eq!(alert.icon_path(Some(6)), format!("{base}human6.png"));
        assert_eq!(alert.icon_path(Some(7)), format!("{base}human6.png"));
        assert_eq!(alert.icon_path(Some(-3)), format!("{base}human0.png"));
    }

    #[test]
    fn test_fixed_icon_ignores_severity() {
        let mut alert = human_health();
        alert.min_severity = None;
        alert.max_severity = None;
        assert_eq!(alert.icon_path(Some(4)), alert.icon);
        assert_eq!(alert.clamp_severity(Some(4)), None);
    }

    #[test]
    fn test_inverted_range_clamps_without_panicking() {
        let mut alert = human_health();
        alert.min_severity = Some(4);
        alert.max_severity = Some(1);
        assert_eq!(alert.clamp_severity(Some(2)), Some(1));
        assert_eq!(alert.clamp_severity(None), Some(1));
        assert_eq!(alert.icon_path(Some(9)), alert.icon.replace("human.png", "human1.png"));
    }

    #[test]
    fn test_max_defaults_to_min() {
        let mut alert = human_health();
        alert.min_severity = Some(2);
        alert.max_severity = None;
        assert_eq!(alert.severity_range(), Some((2, 2)));
        assert_eq!(alert.clamp_severity(Some(9)), Some(2));
    }

    #[test]
    fn test_icon_without_extension() {
        assert_eq!(insert_before_extension("icons/pressure", 2), "icons/pressure2");
        assert_eq!(insert_before_extension("a.rsi/b", 1), "a.rsi/b1");
    }

    #[test]
    fn test_key_uses_category() {
        let alert = human_health();
        assert_eq!(alert.key(), AlertKey::for_category("health"));
    }
}
