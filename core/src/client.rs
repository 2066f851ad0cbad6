//! Per-player HUD client
//!
//! Owns the alert view and the hotbar, queues inbound snapshots until the
//! next frame and collects outbound requests. Within one frame the pending
//! snapshot is always applied before the cooldown pass.

use serde::{Deserialize, Serialize};

use crate::alerts::{AlertKey, AlertsSnapshot, AlertsView, ClickAlertRequest};
use crate::cooldown::{GameClock, GameTime};
use crate::hotbar::{Hotbar, PerformActionRequest};
use crate::toolkit::AlertToolkit;

/// Request bound for the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundRequest {
    ClickAlert(ClickAlertRequest),
    PerformAction(PerformActionRequest),
}

pub struct HudClient<T: AlertToolkit> {
    alerts: AlertsView<T>,
    hotbar: Hotbar,
    /// Latest snapshot received since the last tick
    pending: Option<AlertsSnapshot>,
    outbound: Vec<OutboundRequest>,
}

impl<T: AlertToolkit> HudClient<T> {
    pub fn new(alerts: AlertsView<T>, hotbar: Hotbar) -> Self {
        Self {
            alerts,
            hotbar,
            pending: None,
            outbound: Vec::new(),
        }
    }

    /// Queue a snapshot for the next tick. Only the newest one is kept.
    pub fn receive_snapshot(&mut self, snapshot: AlertsSnapshot) {
        if let Some(pending) = &self.pending {
            if snapshot.sequence <= pending.sequence {
                tracing::debug!(
                    sequence = snapshot.sequence,
                    pending = pending.sequence,
                    "Dropping snapshot older than pending one"
                );
                return;
            }
        }
        self.pending = Some(snapshot);
    }

    /// Run one frame: apply the pending snapshot, then refresh cooldowns
    pub fn tick(&mut self, clock: &impl GameClock) -> GameTime {
        let now = clock.now();
        if let Some(snapshot) = self.pending.take() {
            self.alerts.apply_snapshot(&snapshot);
        }
        self.alerts.frame_update(now);
        self.hotbar.frame_update(now);
        now
    }

    pub fn on_attach(&mut self) {
        self.alerts.on_attach();
    }

    pub fn on_detach(&mut self) {
        self.alerts.on_detach();
    }

    // ─── Interaction ────────────────────────────────────────────────────────

    /// Queue a click request for a rendered alert. Returns false if suppressed.
    pub fn click_alert(&mut self, key: &AlertKey) -> bool {
        match self.alerts.activate(key) {
            Some(request) => {
                self.outbound.push(OutboundRequest::ClickAlert(request));
                true
            }
            None => false,
        }
    }

    /// Queue an action request for a hotbar slot. Returns false if suppressed.
    pub fn activate_slot(&mut self, index: usize) -> bool {
        match self.hotbar.activate(index) {
            Some(request) => {
                self.outbound.push(OutboundRequest::PerformAction(request));
                true
            }
            None => false,
        }
    }

    pub fn hover_alert(&mut self, key: &AlertKey, now: GameTime) -> bool {
        self.alerts.show_tooltip(key, now)
    }

    pub fn unhover_alert(&mut self) {
        self.alerts.hide_tooltip();
    }

    /// Drain queued outbound requests
    pub fn take_outbound(&mut self) -> Vec<OutboundRequest> {
        std::mem::take(&mut self.outbound)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn alerts(&self) -> &AlertsView<T> {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertsView<T> {
        &mut self.alerts
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hotbar
    }

    pub fn pending_sequence(&self) -> Option<u64> {
        self.pending.as_ref().map(|s| s.sequence)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::alerts::AlertState;
    use crate::catalog::{Catalog, CatalogConfig};
    use crate::codec::AlertCodec;
    use crate::cooldown::CooldownInterval;
    use crate::toolkit::{RecordingToolkit, ToolkitOp};

    const CATALOG: &str = r#"
[[alert]]
id = "hungry"
category = "hunger"
name = "Hungry"
icon = "/alerts/hungry.png"

[[alert]]
id = "buckled"
name = "Buckled"
icon = "/alerts/buckled.png"

[[action]]
id = "scream"
name = "Scream"
icon = "/actions/scream.png"
"#;

    struct TestClock {
        now: Cell<GameTime>,
        calls: Cell<u32>,
    }

    impl TestClock {
        fn at(secs: u64) -> Self {
            Self {
                now: Cell::new(Duration::from_secs(secs)),
                calls: Cell::new(0),
            }
        }
    }

    impl GameClock for TestClock {
        fn now(&self) -> GameTime {
            self.calls.set(self.calls.get() + 1);
            self.now.get()
        }
    }

    fn make_client() -> (HudClient<RecordingToolkit>, Catalog) {
        let config: CatalogConfig = toml::from_str(CATALOG).unwrap();
        let mut catalog = Catalog::new();
        catalog.add_config(config);
        let codec = Arc::new(AlertCodec::new(&catalog));
        let mut client = HudClient::new(
            AlertsView::new(codec, RecordingToolkit::new()),
            Hotbar::default(),
        );
        client.on_attach();
        (client, catalog)
    }

    fn snapshot(client: &HudClient<RecordingToolkit>, sequence: u64, ids: &[&str]) -> AlertsSnapshot {
        let codec = client.alerts().codec();
        AlertsSnapshot {
            sequence,
            alerts: ids
                .iter()
                .map(|id| AlertState::new(codec.encode(id).unwrap()))
                .collect(),
        }
    }

    #[test]
    fn test_only_latest_pending_snapshot_applies() {
        let (mut client, _) = make_client();
        client.receive_snapshot(snapshot(&client, 1, &["hungry"]));
        client.receive_snapshot(snapshot(&client, 2, &["buckled"]));
        client.receive_snapshot(snapshot(&client, 1, &["hungry"]));
        assert_eq!(client.pending_sequence(), Some(2));

        client.tick(&TestClock::at(0));
        assert_eq!(client.pending_sequence(), None);
        assert_eq!(client.alerts().toolkit().child_ids(), vec!["buckled"]);
        let creates = client
            .alerts()
            .toolkit()
            .ops()
            .iter()
            .filter(|op| matches!(op, ToolkitOp::Create { .. }))
            .count();
        assert_eq!(creates, 1);
    }

    #[test]
    fn test_tick_applies_snapshot_before_cooldown_pass() {
        let (mut client, _) = make_client();
        let mut snap = snapshot(&client, 1, &["hungry"]);
        snap.alerts[0].cooldown = Some(CooldownInterval::new(
            Duration::from_secs(0),
            Duration::from_secs(10),
        ));
        client.receive_snapshot(snap);

        let clock = TestClock::at(5);
        client.tick(&clock);
        assert_eq!(clock.calls.get(), 1);

        let ops = client.alerts_mut().toolkit_mut().take_ops();
        assert!(matches!(ops[0], ToolkitOp::Create { .. }));
        assert!(matches!(
            ops[1],
            ToolkitOp::SetCooldown { ratio, visible: true, .. } if ratio == 0.5
        ));
    }

    #[test]
    fn test_outbound_requests_queue_in_order() {
        let (mut client, catalog) = make_client();
        client.receive_snapshot(snapshot(&client, 1, &["buckled"]));
        client.tick(&TestClock::at(0));

        let scream = Arc::clone(catalog.action("scream").unwrap());
        client.hotbar_mut().slot_mut(0).unwrap().assign_action(scream, true);

        assert!(client.click_alert(&AlertKey::new(None, Some("buckled"))));
        assert!(client.activate_slot(0));
        assert!(!client.activate_slot(1));
        assert!(!client.click_alert(&AlertKey::for_category("hunger")));

        let outbound = client.take_outbound();
        assert_eq!(outbound.len(), 2);
        assert!(matches!(outbound[0], OutboundRequest::ClickAlert(_)));
        assert!(matches!(
            &outbound[1],
            OutboundRequest::PerformAction(request) if request.action_id == "scream" && request.slot == 1
        ));
        assert!(client.take_outbound().is_empty());
    }

    #[test]
    fn test_detached_client_keeps_state() {
        let (mut client, _) = make_client();
        client.on_detach();
        client.receive_snapshot(snapshot(&client, 1, &["hungry", "buckled"]));
        client.tick(&TestClock::at(0));
        assert!(client.alerts().is_empty());

        client.on_attach();
        assert_eq!(client.alerts().len(), 2);
    }
}
