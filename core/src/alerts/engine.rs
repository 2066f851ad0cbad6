//! Alert reconciliation
//!
//! Keeps the rendered alert elements in sync with the latest snapshot,
//! touching only what changed. An element whose key and alert id survive a
//! snapshot is updated in place, so hover state and an open tooltip are not
//! disturbed by unrelated state changes.

use std::hash::Hash;
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use hudsync_types::formatting::format_countdown;
use hudsync_types::{AlertOrdering, HudConfig};

use super::{AlertKey, AlertState, AlertsSnapshot, ClickAlertRequest};
use crate::catalog::AlertDescriptor;
use crate::codec::{AlertCode, AlertCodec};
use crate::cooldown::{self, CooldownInterval, CooldownProgress, GameTime};
use crate::toolkit::{AlertToolkit, TooltipContent, TooltipController};

/// Decoded snapshot entry
#[derive(Debug, Clone)]
struct TargetAlert {
    key: AlertKey,
    code: AlertCode,
    descriptor: Arc<AlertDescriptor>,
    /// Already clamped to the descriptor's range
    severity: Option<i16>,
    cooldown: Option<CooldownInterval>,
}

/// Live element for one alert key
#[derive(Debug)]
pub struct RenderedElement<H> {
    key: AlertKey,
    code: AlertCode,
    descriptor: Arc<AlertDescriptor>,
    severity: Option<i16>,
    cooldown: Option<CooldownInterval>,
    handle: H,
    /// Last cooldown visual pushed to the toolkit (None = never rendered)
    last_visual: Option<CooldownProgress>,
}

impl<H: Copy + Eq + Hash> RenderedElement<H> {
    /// Create the toolkit element and register it with the tooltip controller
    fn create<T>(target: &TargetAlert, toolkit: &mut T, tooltips: &mut TooltipController<H>) -> Self
    where
        T: AlertToolkit<Handle = H>,
    {
        let handle = toolkit.create_element(&target.descriptor, target.severity);
        tooltips.register(handle);
        Self {
            key: target.key.clone(),
            code: target.code,
            descriptor: Arc::clone(&target.descriptor),
            severity: target.severity,
            cooldown: target.cooldown,
            handle,
            last_visual: None,
        }
    }

    /// Deregister from the tooltip controller, then destroy the toolkit element
    fn release<T>(self, toolkit: &mut T, tooltips: &mut TooltipController<H>)
    where
        T: AlertToolkit<Handle = H>,
    {
        tooltips.deregister(self.handle, toolkit);
        toolkit.destroy_element(self.handle);
    }

    pub fn key(&self) -> &AlertKey {
        &self.key
    }

    pub fn code(&self) -> AlertCode {
        self.code
    }

    pub fn descriptor(&self) -> &Arc<AlertDescriptor> {
        &self.descriptor
    }

    pub fn severity(&self) -> Option<i16> {
        self.severity
    }

    pub fn cooldown(&self) -> Option<CooldownInterval> {
        self.cooldown
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    pub fn icon_path(&self) -> String {
        self.descriptor.icon_path(self.severity)
    }
}

/// Per-player alert view.
///
/// Stores the latest decoded snapshot at all times and renders it through
/// the toolkit while attached to a controlled entity.
pub struct AlertsView<T: AlertToolkit> {
    codec: Arc<AlertCodec>,
    toolkit: T,

    ordering: AlertOrdering,
    tooltip_max_width: f32,
    european_number_format: bool,

    /// Latest decoded state, in snapshot order
    alerts: Vec<TargetAlert>,
    last_sequence: Option<u64>,

    attached: bool,
    elements: HashMap<AlertKey, RenderedElement<T::Handle>>,
    /// Rendered keys in visual order (mirrors the toolkit's child list)
    order: Vec<AlertKey>,
    tooltips: TooltipController<T::Handle>,
}

impl<T: AlertToolkit> AlertsView<T> {
    pub fn new(codec: Arc<AlertCodec>, toolkit: T) -> Self {
        Self::with_config(codec, toolkit, &HudConfig::default())
    }

    pub fn with_config(codec: Arc<AlertCodec>, toolkit: T, config: &HudConfig) -> Self {
        Self {
            codec,
            toolkit,
            ordering: config.alert_ordering,
            tooltip_max_width: config.tooltip_max_width,
            european_number_format: config.european_number_format,
            alerts: Vec::new(),
            last_sequence: None,
            attached: false,
            elements: HashMap::new(),
            order: Vec::new(),
            tooltips: TooltipController::new(),
        }
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Player took control of the owning entity: render the stored state
    pub fn on_attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.reconcile();
    }

    /// Player left the owning entity: release every element
    pub fn on_detach(&mut self) {
        self.tooltips.hide(&mut self.toolkit);
        for key in std::mem::take(&mut self.order) {
            if let Some(element) = self.elements.remove(&key) {
                element.release(&mut self.toolkit, &mut self.tooltips);
            }
        }
        self.elements.clear();
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ─── Snapshots ──────────────────────────────────────────────────────────

    /// Apply a full snapshot. Returns false if it was older than the last one.
    pub fn apply_snapshot(&mut self, snapshot: &AlertsSnapshot) -> bool {
        if let Some(last) = self.last_sequence {
            if snapshot.sequence <= last {
                tracing::debug!(
                    sequence = snapshot.sequence,
                    last,
                    "Dropping stale alerts snapshot"
                );
                return false;
            }
        }
        self.last_sequence = Some(snapshot.sequence);
        self.set_alerts(&snapshot.alerts);
        true
    }

    /// Replace the active alert set and reconcile rendered elements
    pub fn set_alerts(&mut self, states: &[AlertState]) {
        self.alerts = self.decode_all(states);
        self.reconcile();
    }

    /// Decode entries into a keyed target set, skipping unrecognized codes
    fn decode_all(&self, states: &[AlertState]) -> Vec<TargetAlert> {
        let mut target: Vec<TargetAlert> = Vec::with_capacity(states.len());
        let mut index: HashMap<AlertKey, usize> = HashMap::with_capacity(states.len());

        for state in states {
            let descriptor = match self.codec.decode(state.code) {
                Ok(descriptor) => Arc::clone(descriptor),
                Err(e) => {
                    tracing::error!(code = %state.code, error = %e, "Skipping alert entry");
                    continue;
                }
            };

            let cooldown = state.cooldown.and_then(|cd| {
                CooldownInterval::checked(cd.start, cd.end)
                    .map_err(|e| {
                        tracing::warn!(alert = %descriptor.id, error = %e, "Ignoring cooldown");
                    })
                    .ok()
            });

            let entry = TargetAlert {
                key: descriptor.key(),
                code: state.code,
                severity: descriptor.clamp_severity(state.severity),
                cooldown,
                descriptor,
            };

            match index.get(&entry.key) {
                Some(&i) => {
                    tracing::debug!(key = %entry.key, "Duplicate alert key in snapshot, last entry wins");
                    target[i] = entry;
                }
                None => {
                    index.insert(entry.key.clone(), target.len());
                    target.push(entry);
                }
            }
        }

        target
    }

    // ─── Reconciliation ─────────────────────────────────────────────────────

    fn reconcile(&mut self) {
        if !self.attached {
            return;
        }

        // Removals first so a slot is never shown twice
        let stale: Vec<AlertKey> = {
            let wanted: HashSet<&AlertKey> = self.alerts.iter().map(|a| &a.key).collect();
            self.order
                .iter()
                .filter(|key| !wanted.contains(key))
                .cloned()
                .collect()
        };
        for key in &stale {
            self.remove_element(key);
        }

        let targets = std::mem::take(&mut self.alerts);
        for target in &targets {
            self.upsert(target);
        }
        self.alerts = targets;
    }

    fn upsert(&mut self, target: &TargetAlert) {
        let same_alert = self
            .elements
            .get(&target.key)
            .map(|element| element.descriptor.id == target.descriptor.id);

        match same_alert {
            None => self.insert_element(target),
            Some(false) => self.replace_element(target),
            Some(true) => {
                if let Some(element) = self.elements.get_mut(&target.key) {
                    if element.severity != target.severity {
                        self.toolkit.update_severity(element.handle, target.severity);
                        element.severity = target.severity;
                    }
                    element.cooldown = target.cooldown;
                }
            }
        }
    }

    fn insert_element(&mut self, target: &TargetAlert) {
        let position = self.insert_position(target.code);
        let element = RenderedElement::create(target, &mut self.toolkit, &mut self.tooltips);

        self.order.insert(position, target.key.clone());
        if position + 1 != self.order.len() {
            self.toolkit.reorder(element.handle, position);
        }
        self.elements.insert(target.key.clone(), element);
    }

    /// Swap in a different alert for an existing key, keeping its position
    fn replace_element(&mut self, target: &TargetAlert) {
        let Some(position) = self.order.iter().position(|key| key == &target.key) else {
            self.insert_element(target);
            return;
        };

        if let Some(old) = self.elements.remove(&target.key) {
            old.release(&mut self.toolkit, &mut self.tooltips);
        }
        let element = RenderedElement::create(target, &mut self.toolkit, &mut self.tooltips);

        self.order[position] = target.key.clone();
        if position + 1 != self.order.len() {
            self.toolkit.reorder(element.handle, position);
        }
        self.elements.insert(target.key.clone(), element);
    }

    fn remove_element(&mut self, key: &AlertKey) {
        if let Some(element) = self.elements.remove(key) {
            element.release(&mut self.toolkit, &mut self.tooltips);
        }
        self.order.retain(|k| k != key);
    }

    /// Where a new element goes in the visual order
    fn insert_position(&self, code: AlertCode) -> usize {
        match self.ordering {
            AlertOrdering::Arrival => self.order.len(),
            AlertOrdering::Catalog => {
                let rank = self.codec.rank(code);
                self.order
                    .iter()
                    .position(|key| {
                        let other = self
                            .elements
                            .get(key)
                            .and_then(|element| self.codec.rank(element.code));
                        other > rank
                    })
                    .unwrap_or(self.order.len())
            }
        }
    }

    // ─── Per-frame ──────────────────────────────────────────────────────────

    /// Refresh cooldown visuals. Only pushes values that changed.
    pub fn frame_update(&mut self, now: GameTime) {
        if !self.attached {
            return;
        }
        for key in &self.order {
            let Some(element) = self.elements.get_mut(key) else {
                continue;
            };
            let progress = cooldown::evaluate(element.cooldown, now);
            if element.last_visual != Some(progress) {
                self.toolkit
                    .set_cooldown_visual(element.handle, progress.ratio, progress.visible);
                element.last_visual = Some(progress);
            }
        }

        // Keep the open tooltip's countdown current
        let Some(handle) = self.tooltips.shown_for() else {
            return;
        };
        let content = self
            .elements
            .values()
            .find(|element| element.handle == handle)
            .map(|element| self.tooltip_content(element, now));
        if let Some(content) = content {
            self.tooltips.refresh(&content, &mut self.toolkit);
        }
    }

    // ─── Interaction ────────────────────────────────────────────────────────

    /// Build the click request for an activated alert.
    ///
    /// Returns None when the key isn't rendered or its alert can't be encoded.
    pub fn activate(&self, key: &AlertKey) -> Option<ClickAlertRequest> {
        let Some(element) = self.elements.get(key) else {
            tracing::debug!(%key, "Activated alert is not rendered");
            return None;
        };
        match self.codec.encode(&element.descriptor.id) {
            Ok(code) => Some(ClickAlertRequest { code }),
            Err(e) => {
                tracing::error!(error = %e, "Suppressing alert click");
                None
            }
        }
    }

    /// Show the tooltip for a hovered element
    pub fn show_tooltip(&mut self, key: &AlertKey, now: GameTime) -> bool {
        let Some(element) = self.elements.get(key) else {
            return false;
        };
        let handle = element.handle;
        let content = self.tooltip_content(element, now);

        self.tooltips.show(handle, &content, &mut self.toolkit)
    }

    fn tooltip_content(
        &self,
        element: &RenderedElement<T::Handle>,
        now: GameTime,
    ) -> TooltipContent {
        let remaining = cooldown::remaining(element.cooldown, now);
        let cooldown_text = (!remaining.is_zero()).then(|| {
            format_countdown(
                remaining.as_secs_f32(),
                "s",
                "",
                self.european_number_format,
            )
        });
        TooltipContent {
            title: element.descriptor.name.clone(),
            description: element.descriptor.description.clone(),
            cooldown_text,
            max_width: self.tooltip_max_width,
        }
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltips.hide(&mut self.toolkit);
    }

    /// Key of the element currently showing the tooltip
    pub fn tooltip_key(&self) -> Option<&AlertKey> {
        let handle = self.tooltips.shown_for()?;
        self.elements
            .values()
            .find(|element| element.handle == handle)
            .map(|element| &element.key)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn get(&self, key: &AlertKey) -> Option<&RenderedElement<T::Handle>> {
        self.elements.get(key)
    }

    /// Rendered elements in visual order
    pub fn elements(&self) -> impl Iterator<Item = &RenderedElement<T::Handle>> {
        self.order.iter().filter_map(|key| self.elements.get(key))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of decoded alerts in the latest snapshot (rendered or not)
    pub fn active_alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }

    pub fn codec(&self) -> &Arc<AlertCodec> {
        &self.codec
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }
}
