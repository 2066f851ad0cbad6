//! Headless toolkit that records every operation.
//!
//! Backs the replay tool and the engine tests. It keeps a simulated child
//! list so visual ordering can be asserted, not just the op stream.

use std::fmt;

use hashbrown::HashMap;

use super::{AlertToolkit, TooltipContent};
use crate::catalog::AlertDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u32);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One call made against the toolkit
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitOp {
    Create {
        handle: ElementHandle,
        alert_id: String,
        severity: Option<i16>,
        icon: String,
    },
    UpdateSeverity {
        handle: ElementHandle,
        severity: Option<i16>,
        icon: String,
    },
    SetCooldown {
        handle: ElementHandle,
        ratio: f32,
        visible: bool,
    },
    Destroy {
        handle: ElementHandle,
    },
    Reorder {
        handle: ElementHandle,
        position: usize,
    },
    ShowTooltip {
        title: String,
        cooldown_text: Option<String>,
    },
    HideTooltip,
}

impl ToolkitOp {
    /// Create or destroy
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Destroy { .. })
    }
}

impl fmt::Display for ToolkitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create {
                handle,
                alert_id,
                icon,
                ..
            } => write!(f, "create  {} {} ({})", handle, alert_id, icon),
            Self::UpdateSeverity { handle, icon, .. } => write!(f, "update  {} ({})", handle, icon),
            Self::SetCooldown {
                handle,
                ratio,
                visible,
            } => write!(f, "cooldown {} ratio={:.3} visible={}", handle, ratio, visible),
            Self::Destroy { handle } => write!(f, "destroy {}", handle),
            Self::Reorder { handle, position } => write!(f, "reorder {} -> {}", handle, position),
            Self::ShowTooltip {
                title,
                cooldown_text,
            } => match cooldown_text {
                Some(text) => write!(f, "tooltip {:?} [{}]", title, text),
                None => write!(f, "tooltip {:?}", title),
            },
            Self::HideTooltip => write!(f, "tooltip hidden"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingToolkit {
    next_handle: u32,
    ops: Vec<ToolkitOp>,
    /// Simulated child list, in visual order
    children: Vec<ElementHandle>,
    descriptors: HashMap<ElementHandle, AlertDescriptor>,
    tooltip: Option<TooltipContent>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[ToolkitOp] {
        &self.ops
    }

    /// Drain recorded ops
    pub fn take_ops(&mut self) -> Vec<ToolkitOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn children(&self) -> &[ElementHandle] {
        &self.children
    }

    /// Alert ids of live elements, in visual order
    pub fn child_ids(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|h| self.descriptors.get(h).map(|d| d.id.as_str()))
            .collect()
    }

    pub fn tooltip(&self) -> Option<&TooltipContent> {
        self.tooltip.as_ref()
    }
}

impl AlertToolkit for RecordingToolkit {
    type Handle = ElementHandle;

    fn create_element(&mut self, descriptor: &AlertDescriptor, severity: Option<i16>) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.children.push(handle);
        self.descriptors.insert(handle, descriptor.clone());
        self.ops.push(ToolkitOp::Create {
            handle,
            alert_id: descriptor.id.clone(),
            severity,
            icon: descriptor.icon_path(severity),
        });
        handle
    }

    fn update_severity(&mut self, handle: ElementHandle, severity: Option<i16>) {
        let icon = self
            .descriptors
            .get(&handle)
            .map(|d| d.icon_path(severity))
            .unwrap_or_default();
        self.ops.push(ToolkitOp::UpdateSeverity {
            handle,
            severity,
            icon,
        });
    }

    fn set_cooldown_visual(&mut self, handle: ElementHandle, ratio: f32, visible: bool) {
        self.ops.push(ToolkitOp::SetCooldown {
            handle,
            ratio,
            visible,
        });
    }

    fn destroy_element(&mut self, handle: ElementHandle) {
        self.children.retain(|h| *h != handle);
        self.descriptors.remove(&handle);
        self.ops.push(ToolkitOp::Destroy { handle });
    }

    fn reorder(&mut self, handle: ElementHandle, position: usize) {
        if let Some(current) = self.children.iter().position(|h| *h == handle) {
            self.children.remove(current);
            let position = position.min(self.children.len());
            self.children.insert(position, handle);
        }
        self.ops.push(ToolkitOp::Reorder { handle, position });
    }

    fn show_tooltip(&mut self, content: &TooltipContent) {
        self.tooltip = Some(content.clone());
        self.ops.push(ToolkitOp::ShowTooltip {
            title: content.title.clone(),
            cooldown_text: content.cooldown_text.clone(),
        });
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
        self.ops.push(ToolkitOp::HideTooltip);
    }
}
