//! Alert and action catalog
//!
//! This module provides:
//! - **Definitions**: static alert/action descriptors (loaded from TOML)
//! - **Catalog**: the merged, read-only set of descriptors
//! - **Loading**: builtin + custom directory loading with overrides
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  AlertDescriptor (TOML config)                   │
//! │  "humanhealth: category health, human.png, severity 0..=6"      │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                     AlertCodec::new(&catalog)
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    AlertCode <-> descriptor                      │
//! │  "code 3 is humanhealth"                                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                       AlertsView (render)
//! ```

mod config;
mod definitions;

pub use config::{
    Catalog, CatalogError, CatalogSource, default_builtin_dir, default_custom_dir, load_catalog,
    load_file, save_file,
};
pub use definitions::{ActionDescriptor, ActionKind, AlertDescriptor, CatalogConfig};
