//! Replay scripts
//!
//! A script is a JSON list of timestamped frames. Each frame carries one
//! event (a snapshot, a hover, a click...) and then runs one client tick at
//! the frame's game time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hudsync_core::context::HudContext;
use hudsync_core::{
    AlertCode, AlertKey, AlertState, AlertsSnapshot, CooldownInterval, EntityId,
    GameClock, GameTime, HudClient, RecordingToolkit,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse script {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] hudsync_core::CatalogError),

    #[error("unknown alert id '{0}'")]
    UnknownAlert(String),

    #[error("unknown action id '{0}'")]
    UnknownAction(String),

    #[error("no hotbar slot {0}")]
    NoSuchSlot(usize),

    #[error("invalid time {0}s")]
    InvalidTime(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub frames: Vec<Frame>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| ReplayError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    /// Game time in seconds
    pub at: f64,
    #[serde(default)]
    pub event: Event,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Just advance time
    #[default]
    Tick,
    Attach,
    Detach,
    Snapshot {
        /// Defaults to one past the previous snapshot
        #[serde(default)]
        sequence: Option<u64>,
        #[serde(default)]
        alerts: Vec<ScriptAlert>,
    },
    Hover {
        alert: String,
    },
    Unhover,
    Click {
        alert: String,
    },
    AssignSlot {
        slot: usize,
        action: String,
        #[serde(default = "default_enabled")]
        enabled: bool,
        #[serde(default)]
        item: Option<u64>,
    },
    ClearSlot {
        slot: usize,
    },
    SlotCooldown {
        slot: usize,
        start: f64,
        end: f64,
    },
    ActivateSlot {
        slot: usize,
    },
}

fn default_enabled() -> bool {
    true
}

/// Snapshot entry, by alert id or raw code
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptAlert {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub severity: Option<i16>,
    /// `[start, end]` in seconds
    #[serde(default)]
    pub cooldown: Option<[f64; 2]>,
}

fn game_time(secs: f64) -> Result<GameTime, ReplayError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ReplayError::InvalidTime(secs))
}

struct ScriptClock {
    now: GameTime,
}

impl GameClock for ScriptClock {
    fn now(&self) -> GameTime {
        self.now
    }
}

/// Drives a [`HudClient`] backed by a [`RecordingToolkit`] through a script
pub struct Replay {
    context: HudContext,
    client: HudClient<RecordingToolkit>,
    next_sequence: u64,
}

impl Replay {
    pub fn new(context: HudContext) -> Self {
        let client = context.client(RecordingToolkit::new());
        Self {
            context,
            client,
            next_sequence: 1,
        }
    }

    /// Run one frame and return the printable lines it produced
    pub fn step(&mut self, frame: &Frame) -> Result<Vec<String>, ReplayError> {
        let now = game_time(frame.at)?;
        let mut lines = vec![format!("[{:>8.3}] {}", frame.at, self.describe(&frame.event))];

        self.apply_event(&frame.event, now)?;
        self.client.tick(&ScriptClock { now });

        let ops = self.client.alerts_mut().toolkit_mut().take_ops();
        lines.extend(ops.iter().map(|op| format!("           {op}")));
        for request in self.client.take_outbound() {
            let json = serde_json::to_string(&request).unwrap_or_else(|e| e.to_string());
            lines.push(format!("           send {json}"));
        }
        Ok(lines)
    }

    fn describe(&self, event: &Event) -> String {
        match event {
            Event::Snapshot { sequence, alerts } => format!(
                "snapshot #{} ({} alerts)",
                sequence.unwrap_or(self.next_sequence),
                alerts.len()
            ),
            other => format!("{other:?}"),
        }
    }

    fn apply_event(&mut self, event: &Event, now: GameTime) -> Result<(), ReplayError> {
        match event {
            Event::Tick => {}
            Event::Attach => self.client.on_attach(),
            Event::Detach => self.client.on_detach(),
            Event::Snapshot { sequence, alerts } => {
                let sequence = sequence.unwrap_or(self.next_sequence);
                self.next_sequence = sequence.saturating_add(1);
                let alerts = alerts
                    .iter()
                    .map(|alert| self.alert_state(alert))
                    .collect::<Result<Vec<_>, _>>()?;
                self.client.receive_snapshot(AlertsSnapshot { sequence, alerts });
            }
            Event::Hover { alert } => {
                let key = self.alert_key(alert)?;
                if !self.client.hover_alert(&key, now) {
                    tracing::info!(alert = %alert, "Hovered alert is not shown");
                }
            }
            Event::Unhover => self.client.unhover_alert(),
            Event::Click { alert } => {
                let key = self.alert_key(alert)?;
                self.client.click_alert(&key);
            }
            Event::AssignSlot {
                slot,
                action,
                enabled,
                item,
            } => {
                let descriptor = self
                    .context
                    .catalog()
                    .action(action)
                    .cloned()
                    .ok_or_else(|| ReplayError::UnknownAction(action.clone()))?;
                let target = self
                    .client
                    .hotbar_mut()
                    .slot_mut(slot_index(*slot)?)
                    .ok_or(ReplayError::NoSuchSlot(*slot))?;
                if descriptor.item_action {
                    target.assign_item_action(descriptor, item.map(EntityId), *enabled);
                } else {
                    target.assign_action(descriptor, *enabled);
                }
            }
            Event::ClearSlot { slot } => {
                self.client
                    .hotbar_mut()
                    .slot_mut(slot_index(*slot)?)
                    .ok_or(ReplayError::NoSuchSlot(*slot))?
                    .clear();
            }
            Event::SlotCooldown { slot, start, end } => {
                let interval = CooldownInterval::new(game_time(*start)?, game_time(*end)?);
                self.client
                    .hotbar_mut()
                    .slot_mut(slot_index(*slot)?)
                    .ok_or(ReplayError::NoSuchSlot(*slot))?
                    .set_cooldown(Some(interval));
            }
            Event::ActivateSlot { slot } => {
                self.client.activate_slot(slot_index(*slot)?);
            }
        }
        Ok(())
    }

    fn alert_state(&self, alert: &ScriptAlert) -> Result<AlertState, ReplayError> {
        let code = match (&alert.id, alert.code) {
            (Some(id), _) => self
                .context
                .codec()
                .encode(id)
                .map_err(|_| ReplayError::UnknownAlert(id.clone()))?,
            (None, Some(code)) => AlertCode(code),
            (None, None) => return Err(ReplayError::UnknownAlert(String::new())),
        };
        let cooldown = match alert.cooldown {
            Some([start, end]) => Some(CooldownInterval::new(game_time(start)?, game_time(end)?)),
            None => None,
        };
        Ok(AlertState {
            code,
            severity: alert.severity,
            cooldown,
        })
    }

    fn alert_key(&self, id: &str) -> Result<AlertKey, ReplayError> {
        self.context
            .catalog()
            .alert(id)
            .map(|descriptor| descriptor.key())
            .ok_or_else(|| ReplayError::UnknownAlert(id.to_string()))
    }

    pub fn client(&self) -> &HudClient<RecordingToolkit> {
        &self.client
    }
}

/// Script slots are numbered from 1
fn slot_index(slot: usize) -> Result<usize, ReplayError> {
    slot.checked_sub(1).ok_or(ReplayError::NoSuchSlot(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudsync_core::{Catalog, CatalogConfig};
    use hudsync_types::HudConfig;

    const CATALOG: &str = r#"
[[alert]]
id = "humanhealth"
category = "health"
name = "Health"
icon = "/alerts/human.png"
min_severity = 0
max_severity = 6

[[alert]]
id = "buckled"
name = "Buckled"
icon = "/alerts/buckled.png"

[[action]]
id = "scream"
name = "Scream"
icon = "/actions/scream.png"
"#;

    const SCRIPT: &str = r#"
{
  "frames": [
    { "at": 0.0, "event": { "type": "attach" } },
    { "at": 0.5, "event": { "type": "snapshot", "alerts": [
        { "id": "humanhealth", "severity": 3 },
        { "code": 4000 },
        { "id": "buckled", "cooldown": [0.0, 2.0] }
    ] } },
    { "at": 1.0, "event": { "type": "click", "alert": "buckled" } },
    { "at": 1.5, "event": { "type": "assign_slot", "slot": 1, "action": "scream" } },
    { "at": 2.0, "event": { "type": "activate_slot", "slot": 1 } },
    { "at": 2.5 }
  ]
}
"#;

    fn make_replay() -> Replay {
        let config: CatalogConfig = toml::from_str(CATALOG).unwrap();
        let mut catalog = Catalog::new();
        catalog.add_config(config);
        Replay::new(HudContext::new(HudConfig::default(), catalog))
    }

    #[test]
    fn test_script_parses_every_event_shape() {
        let script: Script = serde_json::from_str(SCRIPT).unwrap();
        assert_eq!(script.frames.len(), 6);
        assert!(matches!(script.frames[0].event, Event::Attach));
        assert!(matches!(
            &script.frames[1].event,
            Event::Snapshot { sequence: None, alerts } if alerts.len() == 3
        ));
        assert!(matches!(
            script.frames[3].event,
            Event::AssignSlot { slot: 1, enabled: true, item: None, .. }
        ));
        assert!(matches!(script.frames[5].event, Event::Tick));
    }

    #[test]
    fn test_replay_runs_script() {
        let script: Script = serde_json::from_str(SCRIPT).unwrap();
        let mut replay = make_replay();
        let mut output = Vec::new();
        for frame in &script.frames {
            output.extend(replay.step(frame).unwrap());
        }

        // Bad code skipped, two elements rendered
        assert_eq!(replay.client().alerts().len(), 2);
        assert!(output.iter().any(|line| line.contains("create") && line.contains("human3.png")));
        assert!(output.iter().any(|line| line.contains("click_alert")));
        assert!(output.iter().any(|line| line.contains("perform_action")));
    }

    #[test]
    fn test_unknown_alert_id_is_an_error() {
        let mut replay = make_replay();
        let frame = Frame {
            at: 0.0,
            event: Event::Click {
                alert: "nonexistent".to_string(),
            },
        };
        assert!(matches!(
            replay.step(&frame),
            Err(ReplayError::UnknownAlert(id)) if id == "nonexistent"
        ));
    }

    #[test]
    fn test_max_sequence_does_not_overflow() {
        let mut replay = make_replay();
        let frame = Frame {
            at: 0.0,
            event: Event::Snapshot {
                sequence: Some(u64::MAX),
                alerts: Vec::new(),
            },
        };
        replay.step(&frame).unwrap();

        let next = Frame {
            at: 0.1,
            event: Event::Snapshot {
                sequence: None,
                alerts: Vec::new(),
            },
        };
        let lines = replay.step(&next).unwrap();
        assert!(lines[0].contains(&format!("snapshot #{}", u64::MAX)));
    }

    #[test]
    fn test_negative_time_is_rejected() {
        let mut replay = make_replay();
        let frame = Frame {
            at: -1.0,
            event: Event::Tick,
        };
        assert!(matches!(replay.step(&frame), Err(ReplayError::InvalidTime(_))));
    }
}
