pub mod alerts;
pub mod catalog;
pub mod client;
pub mod codec;
pub mod context;
pub mod cooldown;
pub mod error;
pub mod hotbar;
pub mod toolkit;

// Re-exports for convenience
pub use alerts::{AlertKey, AlertState, AlertsSnapshot, AlertsView, ClickAlertRequest};
pub use catalog::{
    ActionDescriptor, ActionKind, AlertDescriptor, Catalog, CatalogConfig, CatalogError,
    CatalogSource, load_catalog,
};
pub use client::{HudClient, OutboundRequest};
pub use codec::{AlertCode, AlertCodec};
pub use context::HudContext;
pub use cooldown::{CooldownInterval, CooldownProgress, GameClock, GameTime};
pub use error::AlertError;
pub use hotbar::{ActionSlot, EntityId, Hotbar, PerformActionRequest, SlotAssignment, SlotStyle};
pub use toolkit::{AlertToolkit, RecordingToolkit, ToolkitOp, TooltipContent};
