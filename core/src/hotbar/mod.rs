//! Hotbar action slots
//!
//! A fixed row of numbered slots. Each slot evaluates its cooldown with the
//! same evaluator the alert indicators use, so both overlays fade out
//! identically.

mod slot;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ActionKind;
use crate::cooldown::{CooldownInterval, GameTime};

pub use slot::{
    ActionSlot, DISABLED_LABEL_COLOR, ENABLED_LABEL_COLOR, EntityId, SlotAssignment, SlotLabel,
    SlotStyle,
};

/// Default number of slots on the bar
pub const DEFAULT_SLOTS: u8 = 10;

/// Outbound request sent when the player activates a hotbar slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformActionRequest {
    pub action_id: String,
    /// Slot number (1-based)
    pub slot: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<EntityId>,
    /// New state of a toggle action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggled: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Hotbar {
    slots: Vec<ActionSlot>,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl Hotbar {
    pub fn new(slot_count: u8) -> Self {
        Self {
            slots: (1..=slot_count).map(ActionSlot::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot by 0-based index
    pub fn slot(&self, index: usize) -> Option<&ActionSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ActionSlot> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> &[ActionSlot] {
        &self.slots
    }

    pub fn set_cooldown(&mut self, index: usize, interval: Option<CooldownInterval>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.set_cooldown(interval);
        }
    }

    /// Per-frame cooldown pass
    pub fn frame_update(&mut self, now: GameTime) {
        for slot in &mut self.slots {
            slot.update_cooldown(now);
        }
    }

    /// Build the request for an activated slot, unless it can't fire.
    /// Toggle actions flip the slot's pressed state.
    pub fn activate(&mut self, index: usize) -> Option<PerformActionRequest> {
        let slot = self.slots.get_mut(index)?;
        let Some(assignment) = slot.assignment() else {
            tracing::debug!(slot = slot.slot_number(), "Activated empty hotbar slot");
            return None;
        };
        if !slot.is_enabled() {
            tracing::debug!(
                slot = slot.slot_number(),
                action = %assignment.action().id,
                "Activated disabled hotbar slot"
            );
            return None;
        }
        if slot.is_on_cooldown() {
            tracing::debug!(
                slot = slot.slot_number(),
                action = %assignment.action().id,
                remaining_ms = slot.cooldown_remaining().as_millis() as u64,
                "Activated hotbar slot on cooldown"
            );
            return None;
        }

        let action = Arc::clone(assignment.action());
        let item = assignment.item();
        let toggled = (action.kind == ActionKind::Toggle).then(|| {
            let on = !slot.is_toggled();
            slot.set_toggled(on);
            on
        });

        Some(PerformActionRequest {
            action_id: action.id.clone(),
            slot: slot.slot_number(),
            item,
            toggled,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::{ActionDescriptor, ActionKind};

    fn action(id: &str) -> Arc<ActionDescriptor> {
        action_of_kind(id, ActionKind::Instant)
    }

    fn action_of_kind(id: &str, kind: ActionKind) -> Arc<ActionDescriptor> {
        Arc::new(ActionDescriptor {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: format!("/actions/{id}.png"),
            kind,
            item_action: false,
        })
    }

    #[test]
    fn test_default_has_ten_numbered_slots() {
        let hotbar = Hotbar::default();
        assert_eq!(hotbar.len(), 10);
        let labels: Vec<_> = hotbar.slots().iter().map(|s| s.label().text).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"]);
    }

    #[test]
    fn test_activate_assigned_slot() {
        let mut hotbar = Hotbar::default();
        hotbar.slot_mut(2).unwrap().assign_action(action("scream"), true);

        let request = hotbar.activate(2).unwrap();
        assert_eq!(request.action_id, "scream");
        assert_eq!(request.slot, 3);
        assert_eq!(request.item, None);
        assert_eq!(request.toggled, None);
        assert!(!hotbar.slot(2).unwrap().is_toggled());
    }

    #[test]
    fn test_toggle_action_flips_slot() {
        let mut hotbar = Hotbar::default();
        hotbar
            .slot_mut(0)
            .unwrap()
            .assign_action(action_of_kind("flashlight", ActionKind::Toggle), true);

        let request = hotbar.activate(0).unwrap();
        assert_eq!(request.toggled, Some(true));
        assert!(hotbar.slot(0).unwrap().is_toggled());
        assert_eq!(hotbar.slot(0).unwrap().style(false), SlotStyle::Pressed);

        let request = hotbar.activate(0).unwrap();
        assert_eq!(request.toggled, Some(false));
        assert!(!hotbar.slot(0).unwrap().is_toggled());
    }

    #[test]
    fn test_suppressed_toggle_keeps_state() {
        let mut hotbar = Hotbar::default();
        hotbar
            .slot_mut(0)
            .unwrap()
            .assign_action(action_of_kind("flashlight", ActionKind::Toggle), false);

        assert!(hotbar.activate(0).is_none());
        assert!(!hotbar.slot(0).unwrap().is_toggled());
    }

    #[test]
    fn test_activation_suppressed() {
        let mut hotbar = Hotbar::default();
        assert!(hotbar.activate(0).is_none());
        assert!(hotbar.activate(99).is_none());

        hotbar.slot_mut(0).unwrap().assign_action(action("scream"), false);
        assert!(hotbar.activate(0).is_none());

        hotbar.slot_mut(0).unwrap().enable();
        hotbar.set_cooldown(
            0,
            Some(CooldownInterval::new(Duration::from_secs(1), Duration::from_secs(3))),
        );
        hotbar.frame_update(Duration::from_secs(2));
        assert!(hotbar.activate(0).is_none());

        hotbar.frame_update(Duration::from_secs(3));
        assert!(hotbar.activate(0).is_some());
    }

    #[test]
    fn test_item_action_request_carries_item() {
        let mut hotbar = Hotbar::default();
        hotbar
            .slot_mut(4)
            .unwrap()
            .assign_item_action(action("toggle_light"), Some(EntityId(7)), true);

        let request = hotbar.activate(4).unwrap();
        assert_eq!(request.item, Some(EntityId(7)));
    }

    #[test]
    fn test_frame_update_evaluates_every_slot() {
        let mut hotbar = Hotbar::new(3);
        for index in 0..3 {
            hotbar.slot_mut(index).unwrap().assign_action(action("scream"), true);
        }
        hotbar.set_cooldown(
            1,
            Some(CooldownInterval::new(Duration::ZERO, Duration::from_secs(4))),
        );
        hotbar.frame_update(Duration::from_secs(1));

        assert!(!hotbar.slot(0).unwrap().progress().visible);
        let cooling = hotbar.slot(1).unwrap().progress();
        assert!(cooling.visible);
        assert_eq!(cooling.ratio, 0.75);
    }
}
