//! UI toolkit seam
//!
//! The engine never draws anything itself. It drives an [`AlertToolkit`]
//! implementation that owns the real widgets; the toolkit may read element
//! state to render it but never touches the engine's keyed map.

mod recording;

use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashSet;

use crate::catalog::AlertDescriptor;

pub use recording::{ElementHandle, RecordingToolkit, ToolkitOp};

/// Operations the engine issues against the widget tree
pub trait AlertToolkit {
    type Handle: Copy + Eq + Hash + Debug;

    /// Create an element and append it to the end of the alert list
    fn create_element(&mut self, descriptor: &AlertDescriptor, severity: Option<i16>) -> Self::Handle;

    fn update_severity(&mut self, handle: Self::Handle, severity: Option<i16>);

    fn set_cooldown_visual(&mut self, handle: Self::Handle, ratio: f32, visible: bool);

    fn destroy_element(&mut self, handle: Self::Handle);

    /// Move an element to `position` within the alert list
    fn reorder(&mut self, handle: Self::Handle, position: usize);

    fn show_tooltip(&mut self, content: &TooltipContent);

    fn hide_tooltip(&mut self);
}

/// Text shown while hovering an alert
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub description: String,
    /// Remaining cooldown, when the alert is cooling down
    pub cooldown_text: Option<String>,
    pub max_width: f32,
}

/// Tracks which elements may show the shared tooltip and which one does.
///
/// Elements register on creation and deregister on release; releasing the
/// element that currently owns the tooltip hides it.
#[derive(Debug)]
pub(crate) struct TooltipController<H> {
    registered: HashSet<H>,
    shown_for: Option<H>,
    /// Content last pushed to the toolkit
    content: Option<TooltipContent>,
}

impl<H: Copy + Eq + Hash> TooltipController<H> {
    pub(crate) fn new() -> Self {
        Self {
            registered: HashSet::new(),
            shown_for: None,
            content: None,
        }
    }

    pub(crate) fn register(&mut self, handle: H) {
        self.registered.insert(handle);
    }

    pub(crate) fn deregister<T>(&mut self, handle: H, toolkit: &mut T)
    where
        T: AlertToolkit<Handle = H>,
    {
        self.registered.remove(&handle);
        if self.shown_for == Some(handle) {
            self.shown_for = None;
            self.content = None;
            toolkit.hide_tooltip();
        }
    }

    /// Returns false when `handle` is not registered
    pub(crate) fn show<T>(&mut self, handle: H, content: &TooltipContent, toolkit: &mut T) -> bool
    where
        T: AlertToolkit<Handle = H>,
    {
        if !self.registered.contains(&handle) {
            return false;
        }
        self.shown_for = Some(handle);
        self.content = Some(content.clone());
        toolkit.show_tooltip(content);
        true
    }

    /// Re-push the open tooltip, only if its content changed
    pub(crate) fn refresh<T>(&mut self, content: &TooltipContent, toolkit: &mut T)
    where
        T: AlertToolkit<Handle = H>,
    {
        if self.shown_for.is_none() || self.content.as_ref() == Some(content) {
            return;
        }
        self.content = Some(content.clone());
        toolkit.show_tooltip(content);
    }

    pub(crate) fn hide<T>(&mut self, toolkit: &mut T)
    where
        T: AlertToolkit<Handle = H>,
    {
        self.content = None;
        if self.shown_for.take().is_some() {
            toolkit.hide_tooltip();
        }
    }

    pub(crate) fn shown_for(&self) -> Option<H> {
        self.shown_for
    }
}
