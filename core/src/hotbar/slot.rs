use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use hudsync_types::formatting::format_countdown_compact;
use serde::{Deserialize, Serialize};

use crate::catalog::ActionDescriptor;
use crate::cooldown::{self, CooldownInterval, CooldownProgress, GameTime};

pub const ENABLED_LABEL_COLOR: &str = "#7b7e9e";
pub const DISABLED_LABEL_COLOR: &str = "#950000";

/// World entity providing an item action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// What a slot holds
#[derive(Debug, Clone)]
pub enum SlotAssignment {
    Action(Arc<ActionDescriptor>),
    /// Item-provided action, optionally tied to a specific item
    ItemAction {
        action: Arc<ActionDescriptor>,
        item: Option<EntityId>,
    },
}

impl SlotAssignment {
    pub fn action(&self) -> &Arc<ActionDescriptor> {
        match self {
            Self::Action(action) | Self::ItemAction { action, .. } => action,
        }
    }

    pub fn item(&self) -> Option<EntityId> {
        match self {
            Self::Action(_) => None,
            Self::ItemAction { item, .. } => *item,
        }
    }

    fn same_as(&self, other: &SlotAssignment) -> bool {
        match (self, other) {
            (Self::Action(a), Self::Action(b)) => a.id == b.id,
            (
                Self::ItemAction { action: a, item: ia },
                Self::ItemAction { action: b, item: ib },
            ) => a.id == b.id && ia == ib,
            _ => false,
        }
    }
}

/// Style pseudo-class applied to a slot button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStyle {
    Normal,
    Pressed,
    Disabled,
    /// Button keeps its own hover/press styling
    Interactive,
}

/// Number text drawn in the slot corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLabel {
    pub text: String,
    pub color: &'static str,
}

/// One numbered hotbar slot
#[derive(Debug, Clone)]
pub struct ActionSlot {
    slot_number: u8,
    assignment: Option<SlotAssignment>,
    enabled: bool,
    toggled: bool,
    cooldown: Option<CooldownInterval>,
    progress: CooldownProgress,
    total_duration: Duration,
    cooldown_remaining: Duration,
}

impl ActionSlot {
    pub fn new(slot_number: u8) -> Self {
        Self {
            slot_number,
            assignment: None,
            enabled: false,
            toggled: false,
            cooldown: None,
            progress: CooldownProgress::NONE,
            total_duration: Duration::ZERO,
            cooldown_remaining: Duration::ZERO,
        }
    }

    // ─── Assignment ─────────────────────────────────────────────────────────

    pub fn assign_action(&mut self, action: Arc<ActionDescriptor>, enabled: bool) {
        self.assign(SlotAssignment::Action(action), enabled);
    }

    /// Assign an item action. Without an item the slot always shows disabled.
    pub fn assign_item_action(
        &mut self,
        action: Arc<ActionDescriptor>,
        item: Option<EntityId>,
        enabled: bool,
    ) {
        let enabled = enabled && item.is_some();
        self.assign(SlotAssignment::ItemAction { action, item }, enabled);
    }

    fn assign(&mut self, assignment: SlotAssignment, enabled: bool) {
        if self
            .assignment
            .as_ref()
            .is_some_and(|current| current.same_as(&assignment))
        {
            return;
        }
        self.assignment = Some(assignment);
        self.enabled = enabled;
        self.toggled = false;
        self.reset_cooldown();
    }

    pub fn clear(&mut self) {
        if self.assignment.take().is_none() {
            return;
        }
        self.toggled = false;
        self.reset_cooldown();
    }

    pub fn enable(&mut self) {
        if self.assignment.is_some() {
            self.enabled = true;
        }
    }

    /// Show the action as disabled; also drops any cooldown
    pub fn disable(&mut self) {
        if !self.enabled || self.assignment.is_none() {
            return;
        }
        self.enabled = false;
        self.reset_cooldown();
    }

    pub fn set_toggled(&mut self, on: bool) {
        self.toggled = on;
    }

    // ─── Cooldown ───────────────────────────────────────────────────────────

    /// Replace the cooldown interval; takes effect on the next frame pass
    pub fn set_cooldown(&mut self, interval: Option<CooldownInterval>) {
        self.cooldown = interval.filter(|i| !i.is_degenerate());
    }

    pub fn update_cooldown(&mut self, now: GameTime) {
        self.progress = cooldown::evaluate(self.cooldown, now);
        self.total_duration = cooldown::total(self.cooldown);
        self.cooldown_remaining = cooldown::remaining(self.cooldown, now);
    }

    fn reset_cooldown(&mut self) {
        self.cooldown = None;
        self.progress = CooldownProgress::NONE;
        self.total_duration = Duration::ZERO;
        self.cooldown_remaining = Duration::ZERO;
    }

    // ─── Derived display state ──────────────────────────────────────────────

    /// Empty for slots past 10; slot 10 shows "0"
    pub fn label(&self) -> SlotLabel {
        let text = match self.slot_number {
            n if n > 10 => String::new(),
            10 => "0".to_string(),
            n => n.to_string(),
        };
        let color = if self.enabled || self.assignment.is_none() {
            ENABLED_LABEL_COLOR
        } else {
            DISABLED_LABEL_COLOR
        };
        SlotLabel { text, color }
    }

    /// Empty, cooling down or disabled slots never look interactive
    pub fn style(&self, hovered: bool) -> SlotStyle {
        if self.assignment.is_none() {
            SlotStyle::Normal
        } else if self.progress.visible && self.enabled {
            if self.toggled {
                SlotStyle::Pressed
            } else {
                SlotStyle::Normal
            }
        } else if !self.enabled {
            if self.toggled {
                SlotStyle::Pressed
            } else {
                SlotStyle::Disabled
            }
        } else if !hovered && self.toggled {
            SlotStyle::Pressed
        } else {
            SlotStyle::Interactive
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn slot_number(&self) -> u8 {
        self.slot_number
    }

    pub fn assignment(&self) -> Option<&SlotAssignment> {
        self.assignment.as_ref()
    }

    pub fn has_assignment(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    pub fn cooldown(&self) -> Option<CooldownInterval> {
        self.cooldown
    }

    pub fn progress(&self) -> CooldownProgress {
        self.progress
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn cooldown_remaining(&self) -> Duration {
        self.cooldown_remaining
    }

    pub fn is_on_cooldown(&self) -> bool {
        !self.cooldown_remaining.is_zero()
    }

    /// Badge text drawn over the slot while cooling down (empty when ready)
    pub fn cooldown_text(&self, european: bool) -> String {
        format_countdown_compact(self.cooldown_remaining.as_secs_f32(), "", european)
    }
}
