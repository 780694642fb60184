//! Tab panels and their descriptors
//!
//! A panel is a passive flag holder. The controller mutates `active` and
//! `animate`; the host may toggle `disabled`; `fade` is fixed at registration.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use strap_runtime::ClassSet;

use crate::error::TabError;
use crate::state::PanelPhase;
use crate::Result;

/// Ordered record of a tab, owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDescriptor {
    pub id: String,
    /// Label rendered in the nav
    pub title: String,
    pub active: bool,
    pub disabled: bool,
}

impl TabDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            active: false,
            disabled: false,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub active: bool,
    pub disabled: bool,
    /// Copied from the group at registration
    pub fade: bool,
    /// Drives the `in` class of the fade transition
    pub animate: bool,
}

impl PanelState {
    pub fn phase(&self) -> PanelPhase {
        PanelPhase::from_flags(self.active, self.animate)
    }
}

/// Handle to a registered panel. Clones share the same state.
#[derive(Debug, Clone)]
pub struct TabPanel {
    id: String,
    title: String,
    state: Arc<RwLock<PanelState>>,
}

impl TabPanel {
    pub(crate) fn new(descriptor: &TabDescriptor, fade: bool) -> Self {
        Self {
            id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            state: Arc::new(RwLock::new(PanelState {
                active: descriptor.active,
                disabled: descriptor.disabled,
                fade,
                // A panel registered active is shown without waiting for a flip
                animate: descriptor.active,
            })),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> PanelState {
        *self.state.read()
    }

    pub fn phase(&self) -> PanelPhase {
        self.state.read().phase()
    }

    pub fn is_active(&self) -> bool {
        self.state.read().active
    }

    pub fn is_disabled(&self) -> bool {
        self.state.read().disabled
    }

    pub fn fade(&self) -> bool {
        self.state.read().fade
    }

    pub fn animate(&self) -> bool {
        self.state.read().animate
    }

    /// Enable or disable the panel. A disabled panel can never become active.
    pub fn set_disabled(&self, disabled: bool) {
        self.state.write().disabled = disabled;
    }

    /// Move to a new phase, updating `active` and `animate` together
    pub(crate) fn transition_to(&self, target: PanelPhase) -> Result<()> {
        let mut state = self.state.write();
        let current = state.phase();

        if !current.can_transition_to(target) {
            return Err(TabError::InvalidTransition {
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %current,
            to = %target,
            "Panel phase transition"
        );

        let (active, animate) = target.flags();
        state.active = active;
        state.animate = animate;

        Ok(())
    }

    /// Classes for the panel element
    pub fn class_set(&self) -> ClassSet {
        let state = self.state();
        ClassSet::new()
            .with("tab-pane", true)
            .with("active", state.active)
            .with("disabled", state.disabled)
            .with("fade", state.fade)
            .with("in", state.animate)
    }
}
