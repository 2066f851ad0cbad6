//! Alert indicators
//!
//! This module provides:
//! - **Keys**: category-based slot identity
//! - **Wire state**: the snapshot entries sent by the server
//! - **View**: the reconciliation engine that keeps rendered elements in
//!   sync with the latest snapshot
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    AlertsSnapshot (server)                       │
//! │  "seq 42: code 3 severity 4, code 7 cooldown 10s..20s"          │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                      AlertCodec::decode
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  AlertsView (keyed elements)                     │
//! │  "health -> humanhealth@4, pressure -> lowpressure"             │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                        AlertToolkit (UI)
//! ```

pub mod engine;
mod key;


use serde::{Deserialize, Serialize};

use crate::codec::AlertCode;
use crate::cooldown::CooldownInterval;

pub use engine::{AlertsView, RenderedElement};
pub use key::AlertKey;

/// One active alert as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertState {
    pub code: AlertCode,
    #[serde(default)]
    pub severity: Option<i16>,
    #[serde(default)]
    pub cooldown: Option<CooldownInterval>,
}

impl AlertState {
    pub fn new(code: AlertCode) -> Self {
        Self {
            code,
            severity: None,
            cooldown: None,
        }
    }

    pub fn with_severity(mut self, severity: i16) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_cooldown(mut self, cooldown: CooldownInterval) -> Self {
        self.cooldown = Some(cooldown);
        self
    }
}

/// Full replacement set of active alerts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsSnapshot {
    /// Increases with every snapshot the server sends
    pub sequence: u64,
    pub alerts: Vec<AlertState>,
}

/// Outbound request sent when the player clicks an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickAlertRequest {
    pub code: AlertCode,
}
